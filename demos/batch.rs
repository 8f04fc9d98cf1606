extern crate piecewise_spline;

use piecewise_spline::{BSpline, CubicSpline, Interpolant, PiecewiseLinear};

fn main() {

    let x_min = 0.0;
    let x_max = 6.0;

    let t = vec![x_min, 1.0, 2.0, 4.0, 5.0, x_max];
    let y = vec![1.0, -1.0, 0.0, 3.0, 1.0, 1.0];

    let splines: Vec<(&str, Box<dyn Interpolant>)> = vec![
        ("linear", Box::new(PiecewiseLinear::new(t.clone(), y.clone()).unwrap())),
        ("cubic", Box::new(CubicSpline::new(t.clone(), y.clone()).unwrap())),
        ("bspline", Box::new(BSpline::new(t, y).unwrap())),
    ];

    let number_of_steps = 60;
    let step = (x_max - x_min) / number_of_steps as f64;

    let mut x_vector = Vec::new();
    for i in 0..=number_of_steps {
        x_vector.push(x_min + step * i as f64);
    }

    let results: Vec<Vec<f64>> = splines
        .iter()
        .map(|(_, spline)| spline.batch_interpolate(&x_vector).unwrap())
        .collect();

    let header: Vec<&str> = splines.iter().map(|(name, _)| *name).collect();
    println!("x;{}", header.join(";"));
    for i in 0..=number_of_steps {
        let row: Vec<String> = results.iter().map(|r| format!("{:.2}", r[i])).collect();
        println!("{:.2};{}", x_vector[i], row.join(";"));
    }
}
