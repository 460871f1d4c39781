use criterion::{criterion_group, criterion_main, Criterion};
use parsat::sat::cnf::Cnf;
use parsat::sat::parallel;
use parsat::sat::solve_sequential;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

/// Pigeonhole principle: `pigeons` into `holes`, unsatisfiable whenever
/// pigeons > holes. A classic worst case for plain DPLL.
fn pigeonhole(pigeons: i32, holes: i32) -> Cnf {
    let var = |pigeon: i32, hole: i32| (pigeon - 1) * holes + hole;
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    for pigeon in 1..=pigeons {
        clauses.push((1..=holes).map(|hole| var(pigeon, hole)).collect());
    }
    for hole in 1..=holes {
        for first in 1..=pigeons {
            for second in (first + 1)..=pigeons {
                clauses.push(vec![-var(first, hole), -var(second, hole)]);
            }
        }
    }
    Cnf::new(clauses)
}

/// A random 3-SAT instance with a planted satisfying assignment.
fn planted_3sat(vars: i32, clauses: usize, seed: u64) -> Cnf {
    let mut rng = StdRng::seed_from_u64(seed);
    let planted: Vec<bool> = (0..vars).map(|_| rng.gen_bool(0.5)).collect();

    let instance: Vec<Vec<i32>> = (0..clauses)
        .map(|_| {
            let mut picked = Vec::with_capacity(3);
            while picked.len() < 3 {
                let var = rng.gen_range(1..=vars);
                if !picked.contains(&var) {
                    picked.push(var);
                }
            }
            let mut clause: Vec<i32> = picked
                .iter()
                .map(|&var| if rng.gen_bool(0.5) { var } else { -var })
                .collect();
            let satisfied = clause
                .iter()
                .any(|&lit| planted[(lit.abs() - 1) as usize] == (lit > 0));
            if !satisfied {
                clause[0] = -clause[0];
            }
            clause
        })
        .collect();

    Cnf::new(instance)
}

fn bench_pigeonhole(c: &mut Criterion) {
    let cnf = pigeonhole(6, 5);

    c.bench_function("pigeonhole 6/5 - sequential", |b| {
        b.iter(|| black_box(solve_sequential(cnf.clone())))
    });

    c.bench_function("pigeonhole 6/5 - parallel", |b| {
        b.iter(|| black_box(parallel::solve(cnf.clone())))
    });
}

fn bench_random_3sat(c: &mut Criterion) {
    let cnf = planted_3sat(20, 80, 0xFEED);

    c.bench_function("3sat 20/80 - sequential", |b| {
        b.iter(|| black_box(solve_sequential(cnf.clone())))
    });

    c.bench_function("3sat 20/80 - parallel", |b| {
        b.iter(|| black_box(parallel::solve(cnf.clone())))
    });
}

criterion_group!(benches, bench_pigeonhole, bench_random_3sat);
criterion_main!(benches);
