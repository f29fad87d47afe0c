//! Integration tests for warren-output.

use warren_core::{EnvironmentSettings, FoodSettings, RabbitSettings, SimConfig};

fn small_config() -> SimConfig {
    SimConfig {
        environment: EnvironmentSettings {
            grid_size:   12,
            win_width:   0,
            win_height:  0,
            time_factor: 0.05,
        },
        rabbit: RabbitSettings {
            start_rabbits_count:  3,
            rate:                 0.0,
            generate_new:         false,
            scan_radius:          5.0,
            base_hunger:          0.0,
            base_hunger_factor:   0.1,
            hunger_fatigue:       100.0,
            hunger_to_breed:      10.0,
            base_speed:           1.0,
            base_breed_timeout:   10.0,
            breeding_reset_speed: 1.0,
        },
        food: FoodSettings {
            start_food_count: 4,
            rate:             0.0,
            generate_new:     false,
            min_nutrition:    2.0,
            max_nutrition:    6.0,
            lifespan:         50,
        },
        seed:            1,
        census_interval: 1.0,
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;
    use warren_agent::PopulationBest;
    use warren_core::AgentId;

    use super::small_config;
    use crate::csv::CsvWriter;
    use crate::row::{BestRow, CensusRow, SnapshotRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(path: &std::path::Path) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(&dir.path().join("census.csv")),
            ["time", "rabbit_count", "food_count", "removed_rabbits", "eaten_food", "decayed_food"]
        );
        assert_eq!(
            headers(&dir.path().join("snapshots.csv")),
            ["time", "kind", "agent_id", "x", "y", "decayed"]
        );
        assert_eq!(headers(&dir.path().join("best.csv")), ["metric", "value", "agent_id"]);
    }

    #[test]
    fn census_row_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_census(&CensusRow {
            time:            3.0,
            rabbit_count:    7,
            food_count:      2,
            removed_rabbits: 1,
            eaten_food:      4,
            decayed_food:    0,
        })
        .unwrap();
        w.finish().unwrap();

        let rows = records(&dir.path().join("census.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "7");
        assert_eq!(&rows[0][4], "4");
    }

    #[test]
    fn snapshot_decayed_flag_as_integer() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = SnapshotRow { time: 1.5, kind: "food", agent_id: 9, x: 2, y: 3, decayed: true };
        w.write_snapshots(&[row]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir.path().join("snapshots.csv"));
        assert_eq!(&rows[0][0], "1.5");
        assert_eq!(&rows[0][1], "food");
        assert_eq!(&rows[0][5], "1");
    }

    #[test]
    fn best_rows_skip_empty_metrics() {
        let best = PopulationBest {
            lowest_hunger: Some((0.5, AgentId(3))),
            longest_age:   None,
            max_breeding:  Some((2, AgentId(8))),
        };
        let rows = BestRow::from_best(&best);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], BestRow { metric: "max_breeding", value: 2.0, agent_id: 8 });
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn integration_csv() {
        use std::collections::BTreeSet;

        use warren_sim::SimBuilder;

        use crate::observer::SimOutputObserver;

        let dir = tmp();
        let mut sim = SimBuilder::new(small_config()).build().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer).with_snapshot_interval(2.0);

        sim.run_ticks(5, &mut obs).unwrap();
        sim.finish(&mut obs);
        assert!(obs.take_error().is_none());

        let census = records(&dir.path().join("census.csv"));
        assert_eq!(census.len(), 5);

        let snapshots = records(&dir.path().join("snapshots.csv"));
        let times: BTreeSet<String> = snapshots.iter().map(|r| r[0].to_owned()).collect();
        assert_eq!(times.into_iter().collect::<Vec<_>>(), ["0", "2", "4"]);

        let best = records(&dir.path().join("best.csv"));
        let metrics: Vec<&str> = best.iter().map(|r| r.get(0).unwrap()).collect();
        assert_eq!(metrics, ["lowest_hunger", "longest_age", "max_breeding"]);
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use rusqlite::Connection;
    use tempfile::TempDir;
    use warren_sim::SimBuilder;

    use super::small_config;
    use crate::observer::SimOutputObserver;
    use crate::row::{BestRow, CensusRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_census_row() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_census(&CensusRow {
            time:            2.0,
            rabbit_count:    5,
            food_count:      1,
            removed_rabbits: 0,
            eaten_food:      3,
            decayed_food:    1,
        })
        .unwrap();
        w.finish().unwrap();

        let conn = Connection::open(dir.path().join("output.db")).unwrap();
        let (rabbits, eaten): (i64, i64) = conn
            .query_row("SELECT rabbit_count, eaten_food FROM census", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!((rabbits, eaten), (5, 3));
    }

    #[test]
    fn sqlite_best_replaces_by_metric() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_best(&[BestRow { metric: "longest_age", value: 3.0, agent_id: 1 }]).unwrap();
        w.write_best(&[BestRow { metric: "longest_age", value: 9.0, agent_id: 4 }]).unwrap();
        w.finish().unwrap();

        let conn = Connection::open(dir.path().join("output.db")).unwrap();
        assert_eq!(count(&conn, "best"), 1);
        let holder: i64 = conn
            .query_row("SELECT agent_id FROM best WHERE metric = 'longest_age'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(holder, 4);
    }

    #[test]
    fn integration_sqlite() {
        let dir = tmp();
        let mut sim = SimBuilder::new(small_config()).build().unwrap();
        let writer = SqliteWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);

        sim.run_ticks(3, &mut obs).unwrap();
        sim.finish(&mut obs);
        assert!(obs.take_error().is_none());

        let conn = Connection::open(dir.path().join("output.db")).unwrap();
        assert_eq!(count(&conn, "census"), 3);
        let snapshot_times: i64 = conn
            .query_row("SELECT COUNT(DISTINCT time) FROM snapshots", [], |r| r.get(0))
            .unwrap();
        assert_eq!(snapshot_times, 3);
        assert_eq!(count(&conn, "best"), 3);
    }
}
