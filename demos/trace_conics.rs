//! Draw one of each conic with both tracers and print what they produced.
//!
//! Run with: cargo run --example trace_conics --features tracing -- [uhp|kd|pd]

use hypconx::{
    Circle, EquidistantCurve, HypEllipse, Line, Method, Model, Parabola, Point, Session,
    TraceConfig,
};

fn main() -> miette::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hypconx=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if !hypconx::log::ENABLED {
        eprintln!("(build with --features tracing for per-curve log lines)");
    }

    let model = match std::env::args().nth(1).as_deref() {
        Some("kd") => Model::KleinDisk,
        Some("pd") => Model::PoincareDisk,
        _ => Model::PoincareUhp,
    };

    let mut session = Session::new(model, TraceConfig::default());
    session.add(Circle::new(Point::uhp(0.0, 1.5), 0.6));
    session.add(HypEllipse::new(Point::uhp(0.5, 0.75), Point::uhp(0.2, 0.75), 1.01));
    session.add(HypEllipse::new(Point::uhp(-1.0, 1.0), Point::uhp(1.0, 1.0), 0.5));
    session.add(Parabola::new(
        Point::uhp(0.0, 2.0),
        Line::through(Point::uhp(-1.0, 0.8), Point::uhp(1.0, 0.8)),
    ));
    session.add(EquidistantCurve::new(
        Line::through(Point::uhp(0.0, 1.0), Point::uhp(0.0, 3.0)),
        0.4,
    ));

    println!("model {model}");
    for (index, curve) in session.curves().iter().enumerate() {
        for method in [Method::GridScan, Method::Directional] {
            let mut first = None;
            let report = session.draw(index, method, &mut |x: f64, y: f64| {
                first.get_or_insert((x, y));
            })?;
            let method_name = format!("{method:?}");
            print!("{:<18} {:<12} {:>6} points", curve.kind(), method_name, report.points);
            if let Some((x, y)) = first {
                print!(", first at ({x:.4}, {y:.4})");
            }
            for trace in &report.traces {
                let second =
                    trace.second.map_or("-".to_string(), |arm| arm.termination.to_string());
                print!(" [{} / {}]", trace.first.termination, second);
            }
            println!();
        }
    }
    Ok(())
}
