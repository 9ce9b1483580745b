//! Behavioural laws of the turtle core, exercised through the public API.

use turtle_core::{
    Command, Dispatch, Dispatcher, Heading, Point, Rgb, Turtle, TurtleConfig, TurtleEvent,
};

const EPS: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool { (a - b).abs() < EPS }

fn same_point(a: Point, b: Point) -> bool { close(a.x, b.x) && close(a.y, b.y) }

fn config(width: f64, height: f64, step: f64) -> TurtleConfig {
    TurtleConfig { width, height, step, ..TurtleConfig::default() }
}

#[test]
fn forward_then_back_round_trips() {
    let starts = [
        Point::new(0.0, 0.0),
        Point::new(12.5, 99.75),
        Point::new(399.9, 3.3),
        Point::new(799.0, 599.0),
    ];
    for step in [1.0, 17.3, 60.0, 250.0] {
        for start in starts {
            for heading in Heading::ALL {
                let mut t = Turtle::new(&config(800.0, 600.0, step));
                t.place(start, heading);
                t.apply(&Command::Forward);
                t.apply(&Command::Back);
                assert!(
                    same_point(t.state().position, start),
                    "step {} from {:?} facing {}: ended at {:?}",
                    step, start, heading, t.state().position
                );
            }
        }
    }
}

#[test]
fn bigger_then_smaller_restores_geometry() {
    let mut t = Turtle::new(&TurtleConfig::default());
    let before = t.state().clone();
    t.apply(&Command::Bigger);
    t.apply(&Command::Smaller);
    assert!(close(t.state().scale, before.scale));
    assert!(close(t.state().step_size, before.step_size));
    assert!(close(t.state().pen_thickness, before.pen_thickness));
}

#[test]
fn repeated_bigger_strictly_increases() {
    let mut t = Turtle::new(&TurtleConfig::default());
    for _ in 0..6 {
        let before = t.state().clone();
        t.apply(&Command::Bigger);
        assert!(t.state().scale > before.scale);
        assert!(t.state().step_size > before.step_size);
        assert!(t.state().pen_thickness > before.pen_thickness);
    }
}

#[test]
fn wrap_example_from_the_vocabulary_docs() {
    let mut t = Turtle::new(&config(100.0, 100.0, 60.0));
    t.place(Point::new(80.0, 50.0), Heading::Right);
    t.apply(&Command::Forward);
    assert_eq!(t.state().position.x, 40.0);
    t.apply(&Command::Back);
    assert_eq!(t.state().position.x, 80.0);
}

#[test]
fn positions_stay_inside_the_area() {
    let cfg = config(100.0, 70.0, 45.0);
    let mut t = Turtle::new(&cfg);
    let script = ["F", "R", "F", "F", "G", "F", "L", "B", "G", "G", "F", "S", "B"];
    for key in script.iter().cycle().take(200) {
        let cmd = match *key {
            "F" => Command::Forward,
            "B" => Command::Back,
            "L" => Command::Left,
            "R" => Command::Right,
            "G" => Command::Bigger,
            _   => Command::Smaller,
        };
        t.apply(&cmd);
        assert!(t.area().contains(t.state().position), "{:?}", t.state().position);
    }
}

#[test]
fn below_threshold_never_changes_state() {
    let cfg = TurtleConfig { confidence_threshold: 0.8, ..TurtleConfig::default() };
    let dispatcher = Dispatcher::new(cfg.confidence_threshold);
    let mut t = Turtle::new(&cfg);
    let before = t.state().clone();
    let mut events = Vec::new();
    for token in ["FORWARD", "BACK", "LEFT", "RIGHT", "PENUP", "BIGGER", "SMALLER", "Blue", "CLOSE"] {
        for confidence in [0.0, 0.3, 0.79] {
            assert_eq!(dispatcher.dispatch(&mut t, token, confidence, &mut events), Dispatch::Rejected);
        }
    }
    assert_eq!(t.state(), &before);
    assert!(!events.iter().any(|e| matches!(e, TurtleEvent::CloseRequested)));
}

#[test]
fn segment_matches_pen_state() {
    let cfg = TurtleConfig::default();
    let dispatcher = Dispatcher::new(cfg.confidence_threshold);
    let mut t = Turtle::new(&cfg);
    let mut events = Vec::new();

    dispatcher.dispatch(&mut t, "PENUP", 1.0, &mut events);
    events.clear();
    dispatcher.dispatch(&mut t, "FORWARD", 1.0, &mut events);
    assert_eq!(events.iter().filter(|e| matches!(e, TurtleEvent::Segment(_))).count(), 0);

    dispatcher.dispatch(&mut t, "PENDOWN", 1.0, &mut events);
    dispatcher.dispatch(&mut t, "Green", 1.0, &mut events);
    dispatcher.dispatch(&mut t, "BIGGER", 1.0, &mut events);
    events.clear();
    let from = t.state().position;
    dispatcher.dispatch(&mut t, "FORWARD", 1.0, &mut events);

    let segments: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            TurtleEvent::Segment(s) => Some(s.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(segments.len(), 1);
    let seg = &segments[0];
    assert_eq!(seg.from, from);
    assert_eq!(seg.to, t.state().position);
    assert_eq!(seg.color, Rgb::hex(0x008000));
    assert!(close(seg.thickness, 3.0));
}

#[test]
fn color_resolution() {
    let cfg = TurtleConfig::default();
    let dispatcher = Dispatcher::new(cfg.confidence_threshold);
    let mut t = Turtle::new(&cfg);
    let mut events = Vec::new();

    dispatcher.dispatch(&mut t, "Red", 1.0, &mut events);
    assert_eq!(t.state().pen_color, t.colors().lookup("Red"));
    assert_eq!(t.state().pen_color, Rgb::new(255, 0, 0));

    dispatcher.dispatch(&mut t, "Mauveish", 1.0, &mut events);
    assert_eq!(t.state().pen_color, Rgb::BLACK);
}
