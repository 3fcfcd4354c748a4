#[cfg(test)]
mod common;

#[cfg(test)]
mod tests {
    use pumpkin_scheduling::constraints;
    use pumpkin_scheduling::constraints::Constraint;
    use pumpkin_scheduling::engine::Propagator;
    use pumpkin_scheduling::intervals::ReadIntervals;
    use pumpkin_scheduling::propagators::DisjunctiveOptions;
    use pumpkin_scheduling::propagators::DisjunctivePropagator;
    use pumpkin_scheduling::Inconsistency;
    use rand::rngs::SmallRng;
    use rand::Rng;
    use rand::SeedableRng;

    use crate::common::assert_sound;
    use crate::common::feasible_windows;
    use crate::common::is_sequence;
    use crate::common::random_tasks;
    use crate::common::set_up_engine;
    use crate::common::windows;
    use crate::common::Task;

    fn set_up_disjunctive(tasks: &[Task]) -> Result<Vec<(i64, i64)>, Inconsistency> {
        let (mut engine, args) = set_up_engine(tasks);
        constraints::disjunctive(args.clone()).post(&mut engine)?;
        Ok(windows(&engine, &args))
    }

    #[test]
    fn later_task_follows_a_detectable_predecessor() {
        let (mut engine, args) = set_up_engine(&[(0, 10, 3, 1), (2, 10, 4, 1), (0, 5, 4, 1)]);

        constraints::disjunctive(args.clone())
            .post(&mut engine)
            .expect("feasible");

        assert_eq!(windows(&engine, &args), vec![(0, 13), (4, 14), (0, 9)]);
    }

    #[test]
    fn task_is_pushed_behind_a_set_by_edge_finding() {
        let (mut engine, args) =
            set_up_engine(&[(4, 26, 4, 1), (13, 13, 5, 1), (5, 10, 3, 1), (5, 10, 3, 1)]);

        constraints::disjunctive(args.clone())
            .post(&mut engine)
            .expect("feasible");

        assert_eq!(engine.intervals().start_min(args[0].interval), 18);
    }

    #[test]
    fn overloaded_resource_fails() {
        let result = set_up_disjunctive(&[(0, 2, 3, 1), (0, 2, 3, 1), (1, 2, 1, 1)]);

        assert!(
            matches!(result, Err(Inconsistency::ResourceOverload(_))),
            "Expected an overload but was {result:?}"
        );
    }

    #[test]
    fn changes_from_outside_are_propagated() {
        let (mut engine, args) = set_up_engine(&[(0, 10, 3, 1), (0, 10, 4, 1)]);
        constraints::disjunctive(args.clone())
            .post(&mut engine)
            .expect("feasible");
        assert_eq!(windows(&engine, &args), vec![(0, 13), (0, 14)]);

        // The second task now has to overlap [2, 6], which leaves no room for the first one in
        // between
        engine.set_start_min(args[1].interval, 2).expect("feasible");
        engine.set_end_max(args[1].interval, 6).expect("feasible");
        engine.propagate().expect("feasible");

        assert_eq!(engine.intervals().start_min(args[0].interval), 6);
    }

    #[test]
    fn zero_duration_tasks_only_count_when_strict() {
        let tasks = [(0, 1, 4, 1), (2, 2, 0, 1)];

        let (mut engine, args) = set_up_engine(&tasks);
        assert!(constraints::disjunctive(args).post(&mut engine).is_ok());

        let (mut engine, args) = set_up_engine(&tasks);
        assert!(constraints::disjunctive_strict(args)
            .post(&mut engine)
            .is_err());
    }

    #[test]
    fn propagation_is_sound() {
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..300 {
            let num_tasks = rng.gen_range(2..=4);
            let tasks = random_tasks(&mut rng, num_tasks, 1);

            let propagated = set_up_disjunctive(&tasks).ok();
            let feasible = feasible_windows(&tasks, |starts| is_sequence(&tasks, starts));

            assert_sound(&tasks, propagated, feasible);
        }
    }

    #[test]
    fn propagation_only_narrows_and_reaches_a_fixpoint() {
        let mut rng = SmallRng::seed_from_u64(3);

        for _ in 0..300 {
            let num_tasks = rng.gen_range(2..=5);
            let tasks = random_tasks(&mut rng, num_tasks, 1);
            let (mut engine, args) = set_up_engine(&tasks);
            let before = windows(&engine, &args);

            if constraints::disjunctive(args.clone())
                .post(&mut engine)
                .is_err()
            {
                continue;
            }

            let after = windows(&engine, &args);
            for (before, after) in before.iter().zip(&after) {
                assert!(after.0 >= before.0 && after.1 <= before.1, "{tasks:?}");
            }

            let mut intervals = engine.intervals().clone();
            let mut propagator =
                DisjunctivePropagator::new(args.clone(), DisjunctiveOptions::default());
            propagator
                .propagate(&mut intervals)
                .expect("the fixpoint is consistent");
            assert!(intervals.drain_events().is_empty(), "{tasks:?}");
        }
    }
}
