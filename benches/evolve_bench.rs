//! Criterion benchmarks for the GA engine and its problem domains.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_evolve::ga::{GaConfig, GeneticAlgorithm};
use u_evolve::timetable::{Timetable, TimetableProblemDomain};
use u_evolve::tsp::{City, TspSolver};

fn ring(n: usize) -> Vec<City> {
    (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            City::new(i as u32, 100.0 * angle.cos(), 100.0 * angle.sin(), format!("c{i}"))
        })
        .collect()
}

fn timetable(groups: u32) -> Timetable {
    let mut timetable = Timetable::new();
    for id in 1..=5 {
        timetable.add_room(id, format!("R{id}"), 10 * id);
    }
    for id in 1..=10 {
        timetable.add_timeslot(id, format!("slot {id}"));
    }
    for id in 1..=4 {
        timetable.add_professor(id, format!("Prof {id}"));
    }
    for id in 1..=6 {
        timetable.add_module(id, format!("m{id}"), format!("Module {id}"), [id % 4 + 1, (id + 1) % 4 + 1]);
    }
    for id in 1..=groups {
        timetable.add_group(id, 5 * (id % 8 + 1), [id % 6 + 1, (id + 2) % 6 + 1]);
    }
    timetable
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_tsp_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("tsp_solver");
    group.sample_size(10);

    for (n, gen) in [(10usize, 100usize), (30, 50), (60, 30)] {
        let solver = TspSolver::new(GaConfig::tsp().with_max_generations(gen).with_seed(42));
        let cities = ring(n);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_g{}", n, gen), n),
            &(solver, cities),
            |b, (s, cities)| b.iter(|| black_box(s.solve(black_box(cities.clone())))),
        );
    }
    group.finish();
}

fn bench_timetable_ga(c: &mut Criterion) {
    let mut group = c.benchmark_group("timetable_ga");
    group.sample_size(10);

    for groups in [5u32, 20, 40] {
        let domain = TimetableProblemDomain::new(timetable(groups)).expect("valid timetable");
        let ga = GeneticAlgorithm::new(domain, GaConfig::timetable().with_seed(42))
            .expect("valid config");
        group.bench_with_input(BenchmarkId::from_parameter(groups), &ga, |b, ga| {
            b.iter(|| black_box(ga.evolve(black_box(30))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tsp_solver, bench_timetable_ga);
criterion_main!(benches);
