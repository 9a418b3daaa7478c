//! Show one point and one line in all three models.
//!
//! Run with: cargo run --example models

use hypconx::model::LineShape;
use hypconx::{Line, Model, Point};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let p = Point::uhp(0.5, 0.75);
    let q = Point::disk(-0.3, 0.4);
    for model in Model::ALL {
        let a = p.get(model);
        let b = q.get(model);
        println!("{model:>4}: p = ({:.6}, {:.6})  q = ({:.6}, {:.6})", a.x, a.y, b.x, b.y);
    }
    println!("d(p, q) = {:.6}", p.distance(&q));

    let line = Line::through(p, q);
    for model in Model::ALL {
        let [e1, e2] = line.ideal_endpoints(model);
        let shape = match line.shape(model) {
            LineShape::Uhp(s) => format!("{s:?}"),
            LineShape::Klein(s) => format!("{s:?}"),
            LineShape::Disk(s) => format!("{s:?}"),
        };
        println!("{model:>4}: {shape}");
        println!("      ideal ends ({:.4}, {:.4}) and ({:.4}, {:.4})", e1.x, e1.y, e2.x, e2.y);
    }

    let foot = line.nearest_point(&Point::klein(0.0, 0.0), Model::KleinDisk, 1e-12)?;
    let f = foot.get(Model::KleinDisk);
    println!("foot of the Klein origin: ({:.6}, {:.6})", f.x, f.y);
    Ok(())
}
