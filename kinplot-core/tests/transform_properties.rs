use kinplot_core::prelude::*;
use kinplot_core::{DrawCommand, ARC_RESOLUTION};
use nalgebra::{Point3, Vector3};

const TOL: f64 = 1e-9;

fn close(a: &Point3<f64>, b: &Point3<f64>) -> bool {
    (a - b).norm() < TOL
}

fn sample_points() -> Vec<Point3<f64>> {
    vec![
        Point3::new(0.3, -0.2, 0.9),
        Point3::new(-1.0, 0.5, 0.25),
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(2.0, 1.5, -0.7),
    ]
}

#[test]
fn transforms_leave_receiver_untouched() {
    let plane = Plane::from_shape(sample_points()).unwrap().with("alpha", 0.3);
    let before = plane.clone();
    let _ = plane.rotate(&ZAXIS, 33.0);
    let _ = plane.shift(&XAXIS);
    let _ = plane.scale(0.7 * XAXIS + YAXIS).unwrap();
    assert_eq!(plane, before);

    let angle = Angle::named("xy", 70.0, [0.25, 0.28]).unwrap();
    let before = angle.clone();
    let _ = angle.rotate(&XAXIS, 60.0).shift(&YAXIS).scale(3.0).unwrap();
    assert_eq!(angle, before);

    let tree = compound![Point::new(), Line::named("x").unwrap(), angle];
    let before = tree.clone();
    let _ = tree.rotate(&XAXIS, 60.0).shift(&(-0.7 * XAXIS));
    assert_eq!(tree, before);
}

#[test]
fn rotation_preserves_distances() {
    let axis = Vector3::new(1.0, 2.0, -0.5).normalize();
    let line = Line::from_points(&[Point3::new(0.1, 0.2, 0.3), Point3::new(-1.0, 4.0, 2.0)]).unwrap();
    let rotated = line.rotate(&axis, 137.0);
    let d0 = (line.end() - line.start()).norm();
    let d1 = (rotated.end() - rotated.start()).norm();
    assert!((d0 - d1).abs() < TOL);

    let plane = Plane::from_shape(sample_points()).unwrap();
    let turned = plane.rotate(&axis, -48.0);
    for i in 0..4 {
        for j in 0..4 {
            let a = (plane.points()[i] - plane.points()[j]).norm();
            let b = (turned.points()[i] - turned.points()[j]).norm();
            assert!((a - b).abs() < TOL);
        }
    }
}

#[test]
fn rotations_about_one_axis_compose() {
    let axis = Vector3::new(0.0, 1.0, 1.0).normalize();
    let point = Point::at(Point3::new(0.4, -1.2, 0.8)).unwrap();
    let stepwise = point.rotate(&axis, 25.0).rotate(&axis, 50.0);
    let direct = point.rotate(&axis, 75.0);
    assert!(close(&stepwise.position(), &direct.position()));

    let angle = Angle::named("yz", 60.0, 0.5).unwrap();
    let stepwise = angle.rotate(&XAXIS, 100.0).rotate(&XAXIS, 80.0);
    let direct = angle.rotate(&XAXIS, 180.0);
    assert!((stepwise.start() - direct.start()).norm() < TOL);
    assert!((stepwise.normal() - direct.normal()).norm() < TOL);
}

#[test]
fn compound_applies_transform_to_each_child() {
    let children: Vec<Element> = vec![
        Plane::named("xz").unwrap().into(),
        Arrow::named("-y").unwrap().into(),
        Text::new("chi", at(0.7 * YAXIS)).unwrap().into(),
        Angle::named("xy", 80.0, [0.24, 0.28, 0.32]).unwrap().into(),
        compound![Point::new(), Line::named("z").unwrap()].into(),
    ];
    let tree = Compound::new(children.clone());
    let axis = Vector3::new(1.0, 1.0, 0.0).normalize();

    let rotated = tree.rotate(&axis, 42.0);
    let shifted = tree.shift(&(0.7 * XAXIS));
    let scaled = tree.scale(1.8).unwrap();
    for (i, child) in children.iter().enumerate() {
        assert_eq!(rotated.elements()[i], child.rotate(&axis, 42.0));
        assert_eq!(shifted.elements()[i], child.shift(&(0.7 * XAXIS)));
        assert_eq!(scaled.elements()[i], child.scale(1.8).unwrap());
    }
}

#[test]
fn line_x_rotated_a_quarter_turn() {
    let line = Line::named("x").unwrap().rotate(&ZAXIS, 90.0);
    assert!(close(&line.start(), &Point3::new(0.0, 0.0, 0.0)));
    assert!(close(&line.end(), &Point3::new(0.0, 1.0, 0.0)));
}

#[test]
fn origin_point_shifted_and_scaled() {
    let p = Point::new().shift(&XAXIS).scale(2.0).unwrap();
    assert!(close(&p.position(), &Point3::new(2.0, 0.0, 0.0)));
}

#[test]
fn right_angle_in_xy_is_a_quarter_circle() {
    let mut surface = RecordingSurface::new();
    Angle::named("xy", 90.0, 1.0).unwrap().draw(&mut surface).unwrap();
    let points = match &surface.commands()[0] {
        DrawCommand::Polyline { points, .. } => points.clone(),
        other => panic!("expected a polyline, got {:?}", other),
    };
    assert_eq!(points.len(), ARC_RESOLUTION);
    assert!(close(&points[0], &Point3::new(1.0, 0.0, 0.0)));
    assert!(close(points.last().unwrap(), &Point3::new(0.0, 1.0, 0.0)));
    for pair in points.windows(2) {
        assert!((pair[0].coords.norm() - 1.0).abs() < TOL);
        // counter-clockwise seen from +z
        assert!(pair[0].coords.cross(&pair[1].coords).z > 0.0);
    }
}

#[test]
fn compound_of_point_and_line_shifted_up() {
    let c = compound![Point::new(), Line::named("x").unwrap()].shift(&ZAXIS);
    assert_eq!(c.len(), 2);
    match (&c.elements()[0], &c.elements()[1]) {
        (Element::Point(p), Element::Line(l)) => {
            assert!(close(&p.position(), &Point3::new(0.0, 0.0, 1.0)));
            assert!(close(&l.start(), &Point3::new(0.0, 0.0, 1.0)));
            assert!(close(&l.end(), &Point3::new(1.0, 0.0, 1.0)));
        }
        other => panic!("unexpected children {:?}", other),
    }
}

#[test]
fn angle_scale_is_linear() {
    let angle = Angle::named("xy", 45.0, [0.2, 0.3]).unwrap().rotate(&YAXIS, 20.0);
    let chained = angle.scale(1.5).unwrap().scale(0.4).unwrap();
    let direct = angle.scale(0.6).unwrap();
    for (a, b) in chained.radii().iter().zip(direct.radii()) {
        assert!((a - b).abs() < TOL);
    }
    assert_eq!(chained.vertex(), angle.vertex());
    assert_eq!(chained.normal(), angle.normal());
    assert_eq!(chained.start(), angle.start());
}
