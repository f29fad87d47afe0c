//! Unit tests for warren-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, IdAllocator};

    #[test]
    fn allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        let c = ids.allocate();
        assert_eq!((a, b, c), (AgentId(0), AgentId(1), AgentId(2)));
        assert_eq!(ids.issued(), 3);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "#7");
    }
}

#[cfg(test)]
mod geo {
    use crate::{DIRECTIONS, GridPos, Step, adjust_move_if_outside_grid};

    #[test]
    fn manhattan_distance() {
        assert_eq!(GridPos::new(0, 0).manhattan(GridPos::new(9, 9)), 18);
        assert_eq!(GridPos::new(3, 7).manhattan(GridPos::new(5, 2)), 7);
        assert_eq!(GridPos::new(4, 4).manhattan(GridPos::new(4, 4)), 0);
    }

    #[test]
    fn box_neighbourhood_checks_axes_independently() {
        let centre = GridPos::new(5, 5);
        // Corner of the box: Manhattan 4 but still inside a radius-2 box.
        assert!(centre.within_box(GridPos::new(7, 7), 2.0));
        assert!(!centre.within_box(GridPos::new(8, 5), 2.0));
        assert!(!centre.within_box(GridPos::new(5, 2), 2.0));
    }

    #[test]
    fn reflect_at_left_edge() {
        let step = adjust_move_if_outside_grid(GridPos::new(0, 4), Step::new(-1, 0), 10);
        assert_eq!(step, Step::new(1, 0));
    }

    #[test]
    fn reflect_both_axes_in_corner() {
        let step = adjust_move_if_outside_grid(GridPos::new(9, 9), Step::new(1, 1), 10);
        assert_eq!(step, Step::new(-1, -1));
    }

    #[test]
    fn inside_moves_are_untouched() {
        let step = adjust_move_if_outside_grid(GridPos::new(5, 5), Step::new(-1, 1), 10);
        assert_eq!(step, Step::new(-1, 1));
    }

    #[test]
    fn every_reflected_move_stays_in_bounds() {
        let size = 3;
        for x in 0..size {
            for y in 0..size {
                let pos = GridPos::new(x, y);
                for step in DIRECTIONS {
                    let adjusted = adjust_move_if_outside_grid(pos, step, size);
                    assert!(pos.offset(adjusted).in_bounds(size), "{pos} + {step:?}");
                }
            }
        }
    }

    #[test]
    fn scaled_distance_uses_speed() {
        let from = GridPos::new(0, 0);
        let target = GridPos::new(4, 0);
        assert_eq!(Step::new(1, 0).scaled_distance(from, 1.0, target), 3.0);
        assert_eq!(Step::new(1, 0).scaled_distance(from, 2.0, target), 2.0);
        assert_eq!(Step::new(1, 1).scaled_distance(from, 2.0, target), 4.0);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimTime, TICK};

    #[test]
    fn rejects_negative_and_nan() {
        assert!(SimTime::new(-1.0).is_none());
        assert!(SimTime::new(f64::NAN).is_none());
        assert!(SimTime::new(f64::INFINITY).is_none());
        assert_eq!(SimTime::new(0.0), Some(SimTime::ZERO));
    }

    #[test]
    fn ordering_and_arithmetic() {
        let t = SimTime::ZERO + TICK;
        assert!(t > SimTime::ZERO);
        assert_eq!(t.as_f64(), 1.0);
        assert_eq!((t + 0.5) - t, 0.5);
    }

    #[test]
    fn wall_clock_mapping() {
        let t = SimTime::new(10.0).unwrap();
        assert_eq!(t.wall_secs(0.1), 1.0);
    }

    #[test]
    fn display_one_decimal() {
        assert_eq!(SimTime::new(12.345).unwrap().to_string(), "12.3");
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        let xs: Vec<u32> = (0..8).map(|_| a.gen_range(0..1000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen_range(0..1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn exponential_is_positive_and_has_rough_mean() {
        let mut rng = SimRng::new(1);
        let rate = 0.5;
        let n = 20_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let gap = rng.exponential(rate);
            assert!(gap >= 0.0 && gap.is_finite());
            sum += gap;
        }
        let mean = sum / n as f64;
        assert!((mean - 2.0).abs() < 0.1, "mean {mean}");
    }

    #[test]
    fn exponential_with_zero_rate_never_fires() {
        let mut rng = SimRng::new(1);
        assert!(rng.exponential(0.0).is_infinite());
    }

    #[test]
    fn perturb_stays_within_fraction() {
        let mut rng = SimRng::new(3);
        for _ in 0..1000 {
            let v = rng.perturb(10.0, 0.1);
            assert!((9.0..=11.0).contains(&v), "{v}");
        }
        assert_eq!(rng.perturb(0.0, 0.1), 0.0);
    }
}

#[cfg(test)]
mod config {
    use crate::{SimConfig, WarrenError};

    const SETTINGS: &str = r#"{
        "environment": { "grid_size": 20, "win_width": 600, "win_height": 600, "time_factor": 0.05 },
        "rabbit": {
            "start_rabbits_count": 5, "rate": 10, "generate_new": true,
            "scan_radius": 4, "base_hunger": 0, "base_hunger_factor": 0.1,
            "hunger_fatigue": 10, "hunger_to_breed": 2, "base_speed": 1,
            "base_breed_timeout": 30, "breeding_reset_speed": 1
        },
        "food": {
            "start_food_count": 10, "rate": 200, "generate_new": true,
            "min_nutrition": 2, "max_nutrition": 6, "lifespan": 60
        }
    }"#;

    #[test]
    fn parses_settings_file_shape() {
        let config = SimConfig::from_json_str(SETTINGS).unwrap();
        assert_eq!(config.environment.grid_size, 20);
        assert_eq!(config.rabbit.start_rabbits_count, 5);
        assert_eq!(config.food.lifespan, 60);
        assert_eq!(config.seed, 42);
        assert_eq!(config.census_interval, 1.0);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = SimConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, WarrenError::Parse(_)));
    }

    #[test]
    fn missing_field_is_parse_error() {
        let err = SimConfig::from_json_str(r#"{ "environment": { "grid_size": 5 } }"#).unwrap_err();
        assert!(matches!(err, WarrenError::Parse(_)));
    }

    #[test]
    fn tiny_grid_rejected() {
        let mut config = SimConfig::from_json_str(SETTINGS).unwrap();
        config.environment.grid_size = 1;
        assert!(matches!(config.validate(), Err(WarrenError::Config(_))));
    }

    #[test]
    fn inverted_nutrition_range_rejected() {
        let mut config = SimConfig::from_json_str(SETTINGS).unwrap();
        config.food.min_nutrition = 9.0;
        assert!(matches!(config.validate(), Err(WarrenError::Config(_))));
    }

    #[test]
    fn overfull_grid_rejected() {
        let mut config = SimConfig::from_json_str(SETTINGS).unwrap();
        config.environment.grid_size = 3;
        // 5 rabbits + 10 food on 9 cells
        assert!(matches!(config.validate(), Err(WarrenError::Config(_))));
    }

    #[test]
    fn zero_lifespan_rejected() {
        let mut config = SimConfig::from_json_str(SETTINGS).unwrap();
        config.food.lifespan = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SimConfig::load(std::path::Path::new("/nonexistent/settings.json")).unwrap_err();
        assert!(matches!(err, WarrenError::Io(_)));
    }
}
