extern crate piecewise_spline;

use piecewise_spline::{BSpline, Interpolant};

fn main() {

    let t = vec![0.0, 0.5, 2.0, 2.5, 4.0, 6.0];
    let y = vec![0.0, 2.0, -1.0, 1.0, 3.0, 0.0];

    let spline = BSpline::new(t, y).unwrap();
    println!("control points: {}", spline.control_points().transpose());

    let number_of_steps = 60;
    let step = 6.0 / number_of_steps as f64;

    println!("x;y");
    for i in 0..=number_of_steps {
        let x = step * i as f64;
        println!("{:.2};{:.2}", x, spline.interpolate(x).unwrap());
    }
}
