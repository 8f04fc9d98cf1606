extern crate piecewise_spline;

use piecewise_spline::{Interpolant, Schoenberg};

fn main() {

    let a = 0.0;
    let b = std::f64::consts::PI;
    let spline = Schoenberg::new(f64::sin, a, b, 12).unwrap();

    let number_of_steps = 48;
    let step = (b - a) / number_of_steps as f64;

    println!("x;sin(x);quasi");
    for i in 0..=number_of_steps {
        let x = a + step * i as f64;
        println!("{:.3};{:.4};{:.4}", x, x.sin(), spline.interpolate(x).unwrap());
    }
}
