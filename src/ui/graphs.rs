use ecosim::stats::{ChartSink, HistorySnapshot, RingBuffer};

/// Seconds of history kept on screen.
const CHART_CAPACITY: usize = 600;

/// Line chart of population and trait means, one point per simulated second.
pub struct TraitChart {
    pub population: RingBuffer,
    pub avg_speed: RingBuffer,
    pub avg_size: RingBuffer,
    pub last_time: Option<u64>,
}

impl TraitChart {
    pub fn new() -> Self {
        Self {
            population: RingBuffer::new(CHART_CAPACITY),
            avg_speed: RingBuffer::new(CHART_CAPACITY),
            avg_size: RingBuffer::new(CHART_CAPACITY),
            last_time: None,
        }
    }
}

impl Default for TraitChart {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartSink for TraitChart {
    fn append_point(&mut self, point: &HistorySnapshot) {
        self.population.push(point.population as f32);
        self.avg_speed.push(point.avg_speed);
        self.avg_size.push(point.avg_size);
        self.last_time = Some(point.time);
    }

    fn clear_all(&mut self) {
        self.population.clear();
        self.avg_speed.clear();
        self.avg_size.clear();
        self.last_time = None;
    }
}

pub fn draw_graphs(ctx: &egui::Context, chart: &TraitChart) {
    egui::Window::new("Statistics")
        .default_pos(egui::pos2(300.0, 420.0))
        .default_size(egui::vec2(400.0, 300.0))
        .resizable(true)
        .show(ctx, |ui| {
            match chart.last_time {
                Some(t) => ui.label(format!("{} points, last at {t}s", chart.population.len())),
                None => ui.label("No data yet; the first point lands after one simulated second."),
            };

            ui.collapsing("Population", |ui| {
                draw_line_graph(ui, &chart.population, egui::Color32::from_rgb(230, 162, 100), 0);
            });

            ui.collapsing("Trait Means", |ui| {
                let size = egui::vec2(ui.available_width(), 80.0);
                let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
                let rect = response.rect;
                painter.rect_filled(rect, 2.0, egui::Color32::from_gray(20));

                draw_line_in_rect(&painter, &chart.avg_speed, rect, egui::Color32::from_rgb(52, 152, 219));
                draw_line_in_rect(&painter, &chart.avg_size, rect, egui::Color32::from_rgb(155, 89, 182));

                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::from_rgb(52, 152, 219), "Avg Speed");
                    ui.colored_label(egui::Color32::from_rgb(155, 89, 182), "Avg Size");
                });
            });
        });
}

fn draw_line_graph(ui: &mut egui::Ui, buffer: &RingBuffer, color: egui::Color32, decimals: usize) {
    let size = egui::vec2(ui.available_width(), 80.0);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect;

    // Background
    painter.rect_filled(rect, 2.0, egui::Color32::from_gray(20));

    draw_line_in_rect(&painter, buffer, rect, color);

    // Current value label
    if let Some(val) = buffer.last() {
        painter.text(
            egui::pos2(rect.right() - 4.0, rect.top() + 2.0),
            egui::Align2::RIGHT_TOP,
            format!("{val:.decimals$}"),
            egui::FontId::proportional(10.0),
            egui::Color32::from_gray(200),
        );
    }
}

fn draw_line_in_rect(painter: &egui::Painter, buffer: &RingBuffer, rect: egui::Rect, color: egui::Color32) {
    let len = buffer.len();
    if len < 2 {
        return;
    }

    let samples: Vec<f32> = buffer.iter().collect();

    let max_val = samples.iter().cloned().fold(1.0f32, f32::max);
    let min_val = samples.iter().cloned().fold(max_val, f32::min);
    let range = (max_val - min_val).max(1.0);

    let points: Vec<egui::Pos2> = samples
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = rect.left() + (i as f32 / (len - 1) as f32) * rect.width();
            let y = rect.bottom() - ((v - min_val) / range) * rect.height();
            egui::pos2(x, y)
        })
        .collect();

    for pair in points.windows(2) {
        painter.line_segment([pair[0], pair[1]], egui::Stroke::new(1.5, color));
    }
}
