use std::sync::Mutex;

use u_dispatch::distance::TravelMatrix;
use u_dispatch::ga::{
    dispatch, dispatch_with, CancelToken, DispatchConfig, DispatchProblem, DispatchRequest,
    GeneticEngine, ProgressError,
};
use u_dispatch::models::{DispatchType, FixedAssignment, Node, Passenger, Vehicle};
use u_dispatch::{DispatchError, ValidationError};
use u_metaheur::ga::Individual;

/// Complete symmetric matrix over the depot, the vehicles' home nodes, and
/// the passengers, with costs derived from positions on a line.
fn line_matrix(vehicles: &[Vehicle], passengers: &[Passenger]) -> TravelMatrix {
    let mut nodes = vec![(Node::Depot, 0u32)];
    nodes.extend(
        vehicles
            .iter()
            .enumerate()
            .map(|(i, v)| (Node::Vehicle(v.id()), 1_000 + 250 * i as u32)),
    );
    nodes.extend(
        passengers
            .iter()
            .enumerate()
            .map(|(i, p)| (Node::Passenger(p.id()), 80 * (i as u32 + 1))),
    );
    let mut matrix = TravelMatrix::new();
    for (i, &(a, xa)) in nodes.iter().enumerate() {
        for &(b, xb) in &nodes[i + 1..] {
            matrix.insert_symmetric(a, b, xa.abs_diff(xb) + 1);
        }
    }
    matrix
}

fn request(
    vehicles: Vec<Vehicle>,
    passengers: Vec<Passenger>,
    dispatch_type: DispatchType,
) -> DispatchRequest {
    let matrix = line_matrix(&vehicles, &passengers);
    DispatchRequest::new(vehicles, passengers, matrix, dispatch_type)
}

fn small_config(seed: u64) -> DispatchConfig {
    DispatchConfig::default()
        .with_population_size(24)
        .with_max_generations(300)
        .with_seed(seed)
}

#[test]
fn single_vehicle_carries_both_passengers() {
    let problem = DispatchProblem::new(request(
        vec![Vehicle::new(1, 2).with_anchor(true)],
        vec![Passenger::new(100), Passenger::new(200)],
        DispatchType::DistanceOutbound,
    ))
    .unwrap();

    let outcome = GeneticEngine::new(&problem, small_config(1)).run().unwrap();
    let best = outcome.best().unwrap();
    let mut route = best.route(0).to_vec();
    route.sort_unstable();
    assert_eq!(route, vec![0, 1]);
    assert!(best.fitness() > 0.0);
}

#[test]
fn pinned_passenger_stays_in_its_vehicle() {
    let vehicles = vec![Vehicle::new(1, 1), Vehicle::new(2, 1)];
    let passengers = vec![Passenger::new(100), Passenger::new(200)];
    let problem = DispatchProblem::new(
        request(vehicles, passengers, DispatchType::DurationOutbound)
            .with_fixed_assignments(vec![FixedAssignment::new(1, 100, 1)]),
    )
    .unwrap();

    let outcome = GeneticEngine::new(&problem, small_config(2)).run().unwrap();
    for chromosome in outcome.population() {
        assert!(chromosome.fitness() == 0.0 || chromosome.route(0) == [0]);
    }
    assert_eq!(outcome.best().unwrap().route(0), &[0]);
}

#[test]
fn two_front_seat_passengers_in_one_vehicle_score_zero() {
    let problem = DispatchProblem::new(request(
        vec![Vehicle::new(1, 2)],
        vec![
            Passenger::new(100).with_front_seat(true),
            Passenger::new(200).with_front_seat(true),
        ],
        DispatchType::DistanceInbound,
    ))
    .unwrap();

    let outcome = GeneticEngine::new(&problem, small_config(3)).run().unwrap();
    assert_eq!(outcome.population().len(), 24);
    for chromosome in outcome.population() {
        assert_eq!(chromosome.route(0).len(), 2);
        assert_eq!(chromosome.fitness(), 0.0);
    }
}

#[test]
fn same_seed_reproduces_best() {
    let build = || {
        DispatchProblem::new(request(
            vec![Vehicle::new(1, 3), Vehicle::new(2, 2), Vehicle::new(3, 4)],
            (0..7).map(|i| Passenger::new(100 + i)).collect(),
            DispatchType::DurationInbound,
        ))
        .unwrap()
    };
    let (p1, p2) = (build(), build());
    let a = GeneticEngine::new(&p1, small_config(77)).run().unwrap();
    let b = GeneticEngine::new(&p2, small_config(77)).run().unwrap();
    assert_eq!(a.best(), b.best());
    assert_eq!(a.best_fitness_history(), b.best_fitness_history());
}

#[test]
fn final_population_respects_uniqueness_and_capacity() {
    let vehicles = vec![
        Vehicle::new(1, 4),
        Vehicle::new(2, 2).with_anchor(true),
        Vehicle::new(3, 3),
    ];
    let passengers: Vec<Passenger> = (0..8)
        .map(|i| Passenger::new(500 + i).with_front_seat(i % 3 == 0))
        .collect();
    let problem = DispatchProblem::new(
        request(vehicles, passengers, DispatchType::DistanceOutbound).with_fixed_assignments(
            vec![FixedAssignment::new(3, 503, 2), FixedAssignment::new(1, 500, 1)],
        ),
    )
    .unwrap();

    let config = small_config(5).with_max_generations(100);
    let outcome = GeneticEngine::new(&problem, config).run().unwrap();
    for chromosome in outcome.population() {
        assert!(chromosome.is_partition_of(8));
        for (route, vehicle) in chromosome.genes().iter().zip(problem.vehicles()) {
            assert!(route.len() <= vehicle.capacity());
        }
        if problem.pins().violated(chromosome.genes()) {
            assert_eq!(chromosome.fitness(), 0.0);
        }
    }
    for w in outcome.best_fitness_history().windows(2) {
        assert!(w[1] >= w[0]);
    }
    assert!(!problem.pins().violated(outcome.best().unwrap().genes()));
}

#[test]
fn couple_bonus_favors_shared_vehicle() {
    let vehicles = vec![Vehicle::new(1, 2), Vehicle::new(2, 2)];
    let passengers: Vec<Passenger> = (0..4).map(|i| Passenger::new(100 + i)).collect();
    let request = request(vehicles, passengers, DispatchType::DistanceOutbound)
        .with_couples(vec![u_dispatch::models::Couple::new(100, 103)]);
    let config = small_config(8)
        .with_max_generations(50)
        .with_couple_bonus(1.0e9);

    let assignments = dispatch(request, config).unwrap();
    let together = assignments
        .iter()
        .any(|a| a.passenger_ids.contains(&100) && a.passenger_ids.contains(&103));
    assert!(together);
}

#[test]
fn missing_matrix_entry_aborts_run() {
    let problem = DispatchProblem::new(DispatchRequest::new(
        vec![Vehicle::new(1, 2)],
        vec![Passenger::new(100)],
        TravelMatrix::new(),
        DispatchType::DistanceOutbound,
    ))
    .unwrap();
    let err = GeneticEngine::new(&problem, small_config(4))
        .run()
        .unwrap_err();
    assert!(matches!(err, DispatchError::MissingTravelCost { .. }));
}

#[test]
fn insufficient_seats_rejected_before_run() {
    let err = dispatch(
        request(
            vec![Vehicle::new(1, 1)],
            vec![Passenger::new(100), Passenger::new(200)],
            DispatchType::DistanceOutbound,
        ),
        small_config(0),
    )
    .unwrap_err();
    assert_eq!(
        err,
        DispatchError::Validation(ValidationError::InsufficientSeats {
            seats: 1,
            passengers: 2,
        })
    );
}

#[test]
fn over_constrained_pins_exhaust_construction() {
    let problem = DispatchProblem::new(
        request(
            vec![Vehicle::new(1, 3)],
            vec![Passenger::new(100), Passenger::new(200)],
            DispatchType::DurationOutbound,
        )
        .with_fixed_assignments(vec![FixedAssignment::new(1, 200, 3)]),
    )
    .unwrap();
    let config = small_config(6).with_max_construction_attempts(5);
    let err = GeneticEngine::new(&problem, config).run().unwrap_err();
    assert_eq!(err, DispatchError::ConstructionExhausted { attempts: 5 });
}

#[test]
fn progress_is_reported_across_band() {
    let problem = DispatchProblem::new(request(
        vec![Vehicle::new(1, 2), Vehicle::new(2, 2)],
        (0..3).map(|i| Passenger::new(100 + i)).collect(),
        DispatchType::DurationOutbound,
    ))
    .unwrap();
    let seen = Mutex::new(Vec::new());
    let reporter = |run: &str, percent: f64| -> Result<(), ProgressError> {
        assert_eq!(run, "run-42");
        seen.lock().unwrap().push(percent);
        Ok(())
    };

    let config = small_config(9).with_max_generations(10);
    GeneticEngine::new(&problem, config)
        .with_progress("run-42", &reporter)
        .run()
        .unwrap();

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 11);
    assert_eq!(seen[0], 20.0);
    assert!((seen[10] - 80.0).abs() < 1e-9);
    for w in seen.windows(2) {
        assert!(w[1] >= w[0]);
    }
}

#[test]
fn failing_reporter_does_not_abort_run() {
    let problem = DispatchProblem::new(request(
        vec![Vehicle::new(1, 2)],
        vec![Passenger::new(100)],
        DispatchType::DistanceInbound,
    ))
    .unwrap();
    let reporter = |_: &str, _: f64| -> Result<(), ProgressError> {
        Err(ProgressError::new("notification service offline"))
    };
    let outcome = GeneticEngine::new(&problem, small_config(10).with_max_generations(5))
        .with_progress("run", &reporter)
        .run()
        .unwrap();
    assert!(outcome.best().unwrap().fitness() > 0.0);
}

#[test]
fn cancellation_stops_between_generations() {
    let problem = DispatchProblem::new(request(
        vec![Vehicle::new(1, 2), Vehicle::new(2, 2)],
        (0..3).map(|i| Passenger::new(100 + i)).collect(),
        DispatchType::DistanceOutbound,
    ))
    .unwrap();
    let token = CancelToken::new();
    let trigger = token.clone();
    let reporter = move |_: &str, percent: f64| -> Result<(), ProgressError> {
        if percent >= 50.0 {
            trigger.cancel();
        }
        Ok(())
    };

    let config = small_config(11).with_max_generations(10);
    let err = GeneticEngine::new(&problem, config)
        .with_progress("run", &reporter)
        .with_cancel(token)
        .run()
        .unwrap_err();
    assert_eq!(err, DispatchError::Cancelled { generation: 5 });
}

#[test]
fn dispatch_with_reports_progress_and_honors_cancel() {
    let build = || {
        request(
            vec![Vehicle::new(1, 2), Vehicle::new(2, 2)],
            (0..3).map(|i| Passenger::new(100 + i)).collect(),
            DispatchType::DurationInbound,
        )
    };
    let seen = Mutex::new(Vec::new());
    let reporter = |run: &str, percent: f64| -> Result<(), ProgressError> {
        assert_eq!(run, "nightly");
        seen.lock().unwrap().push(percent);
        Ok(())
    };

    let config = small_config(12).with_max_generations(4);
    let assignments = dispatch_with(build(), config.clone(), "nightly", &reporter, None).unwrap();
    assert_eq!(assignments.len(), 2);
    assert_eq!(seen.lock().unwrap().len(), 5);

    let token = CancelToken::new();
    token.cancel();
    let err = dispatch_with(build(), config, "nightly", &reporter, Some(token)).unwrap_err();
    assert_eq!(err, DispatchError::Cancelled { generation: 0 });
}
