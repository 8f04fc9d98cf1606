extern crate piecewise_spline;

use piecewise_spline::first_degree_eval;

fn main() {

    let t = [0.0, 1.0, 2.0, 4.0, 5.0, 6.0];
    let y = [1.0, -1.0, 0.0, 3.0, 1.0, 1.0];

    let x_min = -1.0;
    let x_max = 7.0;
    let number_of_steps = 80;
    let step = (x_max - x_min) / number_of_steps as f64;

    println!("x;y");
    for i in 0..=number_of_steps {
        let x = x_min + step * i as f64;
        println!("{:.2};{:.2}", x, first_degree_eval(&t, &y, x).unwrap());
    }
}
