//! Both tracers against known curves.

use std::collections::HashSet;

use glam::{DVec2, dvec2};
use hypconx::trace::always;
use hypconx::{
    Circle, Conic, DirectionalTrace, EquidistantCurve, GridScan, HypEllipse, ImplicitCurve, Line,
    Method, Metric, Model, Parabola, Point, Session, Termination, TraceConfig, trace_both_branches,
};

#[test]
fn circle_vanishes_one_radius_up_a_geodesic() {
    let center = Point::uhp(0.3, 1.2);
    let radius = 0.7;
    let circle = Circle::new(center.clone(), radius);
    let c = center.get(Model::PoincareUhp);
    let up = Point::uhp(c.x, c.y * f64::exp(radius));
    let down = Point::uhp(c.x, c.y * f64::exp(-radius));
    let cfg = TraceConfig::default();
    assert!(circle.defining_function(&up).abs() < cfg.tolerance);
    assert!(circle.defining_function(&down).abs() < cfg.tolerance);
    assert!(circle.defining_function(&center) < 0.0);
}

#[test]
fn directional_points_are_near_the_grid_scan() {
    let cfg = TraceConfig::default();
    let conic = Conic::from(Circle::new(Point::klein(0.0, 0.0), 0.5));
    let metric = conic.metric(Model::KleinDisk);

    let grid: Vec<DVec2> =
        GridScan::new(|p: DVec2| metric.eval(p), Model::KleinDisk, &cfg).unwrap().collect();
    assert!(!grid.is_empty());

    let seed = conic.seeds(&cfg).unwrap().first().get(Model::KleinDisk);
    let mut traced = Vec::new();
    let mut sink = |x: f64, y: f64| traced.push(dvec2(x, y));
    let report = trace_both_branches(&metric, &mut always, Model::KleinDisk, &cfg, seed, &mut sink);
    assert_eq!(report.first.termination, Termination::Closed);
    assert_eq!(report.points(), traced.len());

    let reach = 2.0 * dvec2(cfg.step_x, cfg.step_y);
    for p in &traced {
        assert!(metric.eval(*p).abs() < cfg.tolerance, "{p:?} is off the curve");
        assert!(
            grid.iter().any(|g| (*g - *p).abs().cmple(reach).all()),
            "{p:?} has no grid neighbor"
        );
    }
}

#[test]
fn circle_outside_the_disk_stops_immediately() {
    // Euclidean radius 2 around the Klein origin never meets the open disk;
    // its nearest "point" is already outside.
    let cfg = TraceConfig::default();
    let metric = |p: DVec2| p.length() - 2.0;
    let mut arm = DirectionalTrace::new(metric, always, Model::KleinDisk, &cfg, dvec2(2.0, 0.0));
    assert_eq!(arm.next(), None);
    assert_eq!(arm.termination(), Some(Termination::LeftRegion));
    assert_eq!(arm.steps(), 0);

    let mut sink = |_: f64, _: f64| panic!("no points expected");
    let start = dvec2(2.0, 0.0);
    let report =
        trace_both_branches(&metric, &mut always, Model::KleinDisk, &cfg, start, &mut sink);
    assert_eq!(report.points(), 0);
    assert_eq!(report.second, None);
}

#[test]
fn every_model_traces_the_same_circle() {
    let mut session = Session::new(Model::PoincareUhp, TraceConfig::default());
    let index = session.add(Circle::new(Point::disk(0.1, 0.2), 0.8));
    for model in Model::ALL {
        session.set_model(model);
        let mut pts = Vec::new();
        let mut sink = |x: f64, y: f64| pts.push(dvec2(x, y));
        let report = session.draw(index, Method::Directional, &mut sink).unwrap();
        assert_eq!(report.traces.len(), 1);
        assert_eq!(report.traces[0].first.termination, Termination::Closed, "{model}");
        let curve = session.curve(index).unwrap();
        for p in pts {
            assert!(curve.defining_function(&Point::new(model, p)).abs() < 0.05, "{model}: {p:?}");
        }
    }
}

#[test]
fn predicate_limits_the_directional_trace() {
    let mut session = Session::new(Model::PoincareDisk, TraceConfig::default());
    session.add(Circle::new(Point::disk(0.0, 0.0), 1.0));
    let mut upper_half = |c: DVec2, _: DVec2| c.y >= 0.0;
    let mut pts = Vec::new();
    let mut sink = |x: f64, y: f64| pts.push(dvec2(x, y));
    let report = session.draw_until(0, Method::Directional, &mut upper_half, &mut sink).unwrap();
    assert!(pts.iter().all(|p| p.y >= 0.0));
    let trace = report.traces[0];
    assert_eq!(trace.first.termination, Termination::Rejected);
    assert_eq!(trace.second.map(|arm| arm.termination), Some(Termination::Rejected));
}

fn open_conics() -> [(&'static str, Conic); 3] {
    let directrix = Line::through(Point::uhp(-1.0, 0.8), Point::uhp(1.0, 0.8));
    let axis = Line::through(Point::uhp(0.0, 1.0), Point::uhp(0.0, 3.0));
    [
        ("hyperbola", HypEllipse::new(Point::uhp(-1.0, 1.0), Point::uhp(1.0, 1.0), 0.5).into()),
        ("parabola", Parabola::new(Point::uhp(0.0, 2.0), directrix).into()),
        ("equidistant", EquidistantCurve::new(axis, 0.4).into()),
    ]
}

#[test]
fn open_conics_are_traced_to_the_boundary_in_every_model() {
    // Lattice points stay within a pixel of the curve, so |f| is only held to
    // the grid tolerance where one pixel is short in hyperbolic terms.
    let cfg = TraceConfig::default().with_steps(0.002, 0.002);
    let step = dvec2(cfg.step_x, cfg.step_y);
    for (name, conic) in open_conics() {
        let seeds = conic.seeds(&cfg).unwrap();
        for model in Model::ALL {
            let metric = conic.metric(model);
            let mut checked = 0;
            for seed in seeds.distinct() {
                let start = seed.get(model);
                let mut pts = Vec::new();
                let mut sink = |x: f64, y: f64| pts.push(dvec2(x, y));
                let report =
                    trace_both_branches(&metric, &mut always, model, &cfg, start, &mut sink);
                assert_eq!(report.first.termination, Termination::LeftRegion, "{name} in {model}");
                assert_eq!(
                    report.second.map(|arm| arm.termination),
                    Some(Termination::LeftRegion),
                    "{name} in {model}"
                );
                assert_eq!(report.points(), pts.len());

                let mut cells = HashSet::new();
                for p in &pts {
                    let cell = ((*p - start) / step).round().as_ivec2();
                    assert!(cells.insert(cell), "{name} in {model}: {p:?} traced twice");
                    if Point::new(model, *p).get(Model::KleinDisk).length() <= 0.6 {
                        checked += 1;
                        let f = metric.eval(*p);
                        assert!(f.abs() < cfg.tolerance, "{name} in {model}: {p:?} is off by {f}");
                    }
                }
            }
            assert!(checked > 0, "{name} in {model}: nothing traced near the center");
        }
    }
}
