use agrimind_core::detection::DetectionFrame;
use agrimind_core::forecast::{yield_series, ForecastPoint, ModelStatus};
use agrimind_core::pipeline::SessionReport;
use agrimind_core::recommend::Recommendation;
use agrimind_core::series::{column, Field, TimeSeriesPoint};
use agrimind_core::trend::{moving_average, TrendSignals};
use agrimind_core::vegetation::ZoneSummary;
use console::Style;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    good: Style,
    warn: Style,
    disabled: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            good: Style::new().green(),
            warn: Style::new().yellow().bold(),
            disabled: Style::new().dim().yellow(),
        }
    }
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

pub fn print_series_table(points: &[TimeSeriesPoint], window: usize) {
    let s = Styles::new();
    let ma = moving_average(&column(points, Field::Yield), window);

    println!();
    println!("  {}", s.title.apply_to("Yield & Weather"));
    println!(
        "  {:<12} {:>9} {:>9} {:>9} {:>9} {:>9}",
        s.label.apply_to("Date"),
        s.label.apply_to("Yield"),
        s.label.apply_to(format!("MA({window})")),
        s.label.apply_to("Rain"),
        s.label.apply_to("Temp"),
        s.label.apply_to("NDVI"),
    );
    for (point, avg) in points.iter().zip(ma) {
        println!(
            "  {:<12} {:>9} {:>9} {:>9} {:>9} {:>9}",
            point.date,
            s.value.apply_to(cell(point.yield_value)),
            cell(avg),
            cell(point.rainfall),
            cell(point.temperature),
            cell(point.vegetation_index),
        );
    }
    println!();
}

pub fn print_signals(signals: &TrendSignals) {
    let s = Styles::new();
    println!("  {}", s.header.apply_to("Signals"));
    for (name, fired) in [
        ("Yield trend up", signals.yield_trend_up),
        ("Rainfall deficit", signals.rainfall_deficit),
        ("Heat stress", signals.heat_stress),
    ] {
        let shown = if fired {
            s.warn.apply_to("yes")
        } else {
            s.disabled.apply_to("no")
        };
        println!("    {:<18}{}", s.label.apply_to(name), shown);
    }
    println!();
}

pub fn print_recommendations(recommendations: &[Recommendation]) {
    let s = Styles::new();
    println!("  {}", s.header.apply_to("Recommendations"));
    if recommendations.is_empty() {
        println!(
            "    {}",
            s.disabled
                .apply_to("Upload data or train the model to see tailored recommendations.")
        );
    }
    for rec in recommendations {
        println!("    {}", s.warn.apply_to(&rec.title));
        println!("      {}", rec.detail);
    }
    println!();
}

pub fn print_model_status(status: ModelStatus) {
    let s = Styles::new();
    let shown = match status {
        ModelStatus::Ready => s.good.apply_to(status.to_string()),
        ModelStatus::Idle | ModelStatus::Training => s.value.apply_to(status.to_string()),
        _ => s.warn.apply_to(status.to_string()),
    };
    println!();
    println!("  {:<14}{}", s.label.apply_to("Model"), shown);
}

pub fn print_forecast(forecast: &[ForecastPoint], latest_yield: Option<f64>) {
    let s = Styles::new();
    println!();
    println!("  {}", s.header.apply_to("Forecast"));
    if let Some(latest) = latest_yield {
        println!(
            "    {:<8}{}",
            s.label.apply_to("Latest"),
            s.value.apply_to(format!("{latest:.2}"))
        );
    }
    for point in forecast {
        println!(
            "    {:<8}{}",
            s.label.apply_to(&point.label),
            s.good.apply_to(format!("{:.2}", point.predicted_yield))
        );
    }
    println!();
}

pub fn print_zones(summary: &ZoneSummary) {
    let s = Styles::new();
    println!();
    println!("  {}", s.title.apply_to("Vigor Zones"));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Greenness"),
        s.value
            .apply_to(format!("{:.1} .. {:.1}", summary.min, summary.max))
    );
    for zone in &summary.zones {
        println!(
            "    {:<12}{}",
            s.label.apply_to(format!("Zone {}", zone.zone_id)),
            s.good.apply_to(format!("{:.2}", zone.centroid))
        );
    }
    println!();
}

pub fn print_detection_frame(frame: &DetectionFrame) {
    let s = Styles::new();
    let captions: Vec<String> = frame.detections.iter().map(|d| d.caption()).collect();
    let shown = if captions.is_empty() {
        s.disabled.apply_to("none".to_string())
    } else {
        s.good.apply_to(captions.join(", "))
    };
    println!(
        "  {} {}  {}",
        s.label.apply_to(format!("frame {:>5}", frame.frame_index)),
        s.label.apply_to(format!("@{:.2}", frame.threshold)),
        shown
    );
}

pub fn print_report(report: &SessionReport, window: usize) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("AgriMind Report"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));

    if report.series.is_empty() {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Series"),
            s.disabled.apply_to("no data")
        );
    } else {
        print_series_table(&report.series, window);
        print_signals(&report.signals);
        println!(
            "  {:<14}{}",
            s.label.apply_to("Model"),
            s.value.apply_to(&report.model_status)
        );
        if !report.forecast.is_empty() {
            print_forecast(&report.forecast, yield_series(&report.series).last().copied());
        }
    }

    if let Some(ref zones) = report.zones {
        print_zones(zones);
    }

    if !report.detections.is_empty() {
        println!("  {}", s.header.apply_to("Latest detections"));
        for detection in &report.detections {
            println!("    {}", s.good.apply_to(detection.caption()));
        }
        println!();
    }

    print_recommendations(&report.recommendations);
}
