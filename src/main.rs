//! # In-place algebra over sorted sets
//!
//! Folds a few sets of integers together with each associative operation.

#![warn(clippy::pedantic)]

use swapset::prelude::*;

fn main() {
    let sets: [&[u32]; 4] = [
        &[1, 3, 5, 7, 9],
        &[3, 5, 7, 9, 11],
        &[5, 10, 15, 20],
        &[2, 3, 5, 7, 11],
    ];

    let orig = sets.concat();
    let mut sizes: Vec<_> = sets.iter().map(|set| set.len()).collect();
    let pivots = pivots(&mut sizes);

    let mut data = orig.clone();
    let size = apply_slice(&Union, &mut data, pivots);
    println!("∪: {:?}", &data[..size]);

    data.clone_from(&orig);
    let size = apply_slice(&Inter, &mut data, pivots);
    println!("∩: {:?}", &data[..size]);

    data.clone_from(&orig);
    let size = apply_slice(&SymDiff, &mut data, pivots);
    println!("∆: {:?}", &data[..size]);
}
