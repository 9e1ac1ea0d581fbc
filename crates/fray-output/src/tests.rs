//! Integration tests for fray-output.

use fray_core::{GridBounds, Species};
use fray_world::Roster;

fn sample_roster() -> Roster {
    let mut roster = Roster::new(GridBounds::new(100, 100));
    roster.add(Species::Orc, "Grum", 10.0, 20.0).unwrap();
    roster.add(Species::Knight, "Galahad", 30.5, 40.0).unwrap();
    roster.add(Species::Bear, "Ursa", 50.0, 60.0).unwrap();
    roster
}

#[cfg(test)]
mod store_tests {
    use fray_core::{GridBounds, Species};
    use fray_world::Roster;
    use tempfile::TempDir;

    use super::sample_roster;
    use crate::store::{load_roster, save_roster};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tmp();
        let path = dir.path().join("roster.txt");
        let saved = sample_roster();
        assert_eq!(save_roster(&saved, &path).unwrap(), 3);

        let mut loaded = Roster::new(GridBounds::new(100, 100));
        let report = load_roster(&mut loaded, &path).unwrap();
        assert_eq!(report.loaded, 3);
        assert_eq!(report.skipped, 0);

        for (a, b) in saved.iter().zip(loaded.iter()) {
            assert_eq!(a.species, b.species);
            assert_eq!(a.name, b.name);
            assert_eq!(a.pos, b.pos);
        }
    }

    #[test]
    fn malformed_lines_are_skipped_not_fatal() {
        let dir = tmp();
        let path = dir.path().join("roster.txt");
        std::fs::write(
            &path,
            "Orc Grum 10 20\n\
             Dragon Smaug 1 2\n\
             Knight Galahad ten 40\n\
             \n\
             Bear Ursa 50 60\n",
        )
        .unwrap();

        let mut roster = Roster::new(GridBounds::new(100, 100));
        let report = load_roster(&mut roster, &path).unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped, 2);
        let names: Vec<&str> = roster.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Grum", "Ursa"]);
    }

    #[test]
    fn out_of_bounds_records_are_skipped() {
        let dir = tmp();
        let path = dir.path().join("roster.txt");
        std::fs::write(&path, "Orc Grum 10 20\nBear Ursa 5000 60\n").unwrap();

        let mut roster = Roster::new(GridBounds::new(100, 100));
        let report = load_roster(&mut roster, &path).unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn load_replaces_previous_contents() {
        let dir = tmp();
        let path = dir.path().join("roster.txt");
        std::fs::write(&path, "Knight Galahad 1 2\n").unwrap();

        let mut roster = sample_roster();
        let report = load_roster(&mut roster, &path).unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.iter().next().unwrap().name, "Galahad");
    }

    #[test]
    fn open_failure_leaves_roster_untouched() {
        let dir = tmp();
        let mut roster = sample_roster();
        let missing = dir.path().join("no_such_file.txt");
        assert!(load_roster(&mut roster, &missing).is_err());
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn save_overwrites_fully() {
        let dir = tmp();
        let path = dir.path().join("roster.txt");
        save_roster(&sample_roster(), &path).unwrap();

        let mut small = Roster::new(GridBounds::new(100, 100));
        small.add(Species::Orc, "Solo", 1.0, 1.0).unwrap();
        save_roster(&small, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Orc Solo 1 1\n");
    }
}

#[cfg(test)]
mod sink_tests {
    use fray_combat::BattleSink;
    use tempfile::TempDir;

    use crate::sinks::FileSink;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn file_sink_appends_lines_in_order() {
        let dir = tmp();
        let path = dir.path().join("log.txt");

        let mut sink = FileSink::create(&path).unwrap();
        sink.on_result("first result");
        sink.on_result("second result");
        assert!(sink.take_error().is_none());
        drop(sink);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first result\nsecond result\n");
    }

    #[test]
    fn file_sink_appends_across_reopens() {
        let dir = tmp();
        let path = dir.path().join("log.txt");

        let mut sink = FileSink::create(&path).unwrap();
        sink.on_result("run one");
        drop(sink);

        let mut sink = FileSink::create(&path).unwrap();
        sink.on_result("run two");
        drop(sink);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "run one\nrun two\n");
    }
}

#[cfg(test)]
mod map_tests {
    use fray_core::GridBounds;
    use fray_world::Roster;

    use super::sample_roster;
    use crate::map::{render_map, render_survivors};

    #[test]
    fn map_shows_species_symbols() {
        let roster = sample_roster();
        let rendered = render_map(&roster.snapshot_alive(), roster.bounds());
        assert!(rendered.contains('O'));
        assert!(rendered.contains('K'));
        assert!(rendered.contains("Alive NPCs: 3"));
    }

    #[test]
    fn overlapping_cell_shows_occupant_count() {
        let mut roster = Roster::new(GridBounds::new(50, 50));
        roster.add(fray_core::Species::Orc, "a", 10.0, 10.0).unwrap();
        roster.add(fray_core::Species::Orc, "b", 10.0, 10.0).unwrap();
        let rendered = render_map(&roster.snapshot_alive(), roster.bounds());
        assert!(rendered.contains('2'), "two co-located NPCs render as a digit");
        assert!(rendered.contains("Cells with multiple NPCs: 1"));
    }

    #[test]
    fn empty_roster_renders_whole_grid_window() {
        let rendered = render_map(&[], GridBounds::new(30, 30));
        assert!(rendered.contains("X[0-29] Y[0-29]"));
        assert!(rendered.contains("Alive NPCs: 0"));
    }

    #[test]
    fn survivor_summary_lists_positions() {
        let roster = sample_roster();
        let rendered = render_survivors(30, 50, &roster.snapshot_alive());
        assert!(rendered.contains("Total survivors: 3 out of 50"));
        assert!(rendered.contains("(10,20)"));
        assert!(rendered.contains("Orc Grum"));
    }

    #[test]
    fn survivor_summary_handles_wipeout() {
        let rendered = render_survivors(30, 50, &[]);
        assert!(rendered.contains("No survivors!"));
    }
}

#[cfg(test)]
mod report_tests {
    use std::time::Duration;

    use fray_core::{GridBounds, SimConfig};
    use fray_sim::{SimReport, SimReporter};
    use fray_world::Npc;
    use tempfile::TempDir;

    use super::sample_roster;
    use crate::report::{CsvReporter, MultiReporter};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn config() -> SimConfig {
        SimConfig {
            grid:         GridBounds::new(100, 100),
            initial_npcs: 3,
            duration:     Duration::from_secs(30),
            tick_period:  Duration::from_millis(100),
            seed:         42,
        }
    }

    #[test]
    fn csv_reporter_writes_per_second_rows() {
        let dir = tmp();
        let path = dir.path().join("summary.csv");
        let snapshot = sample_roster().snapshot_alive();

        let mut reporter = CsvReporter::create(&path).unwrap();
        reporter.on_start(&config(), &snapshot);
        reporter.on_second(1, &snapshot);
        reporter.on_end(&SimReport {
            elapsed:       Duration::from_secs(30),
            initial_count: 3,
            survivors:     snapshot.clone(),
        });
        assert!(reporter.take_error().is_none());
        drop(reporter);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = reader.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["second", "alive", "orcs", "knights", "bears"]);
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[1][0], "1");
        assert_eq!(&rows[1][1], "3");
        assert_eq!(&rows[1][2], "1"); // one orc
    }

    #[test]
    fn multi_reporter_fans_out_in_order() {
        #[derive(Default)]
        struct Counter(std::rc::Rc<std::cell::RefCell<Vec<&'static str>>>);
        impl SimReporter for Counter {
            fn on_second(&mut self, _second: u64, _alive: &[Npc]) {
                self.0.borrow_mut().push("tick");
            }
        }

        let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut multi = MultiReporter::new()
            .push(Box::new(Counter(log.clone())))
            .push(Box::new(Counter(log.clone())));

        multi.on_second(1, &[]);
        assert_eq!(log.borrow().len(), 2);
    }
}

#[cfg(test)]
#[cfg(feature = "sqlite")]
mod sqlite_tests {
    use fray_combat::BattleSink;
    use tempfile::TempDir;

    use crate::sqlite::SqliteSink;

    #[test]
    fn battle_log_rows_preserve_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("battles.db");

        let mut sink = SqliteSink::create(&path).unwrap();
        sink.on_result("a kills b");
        sink.on_result("c defended");
        assert!(sink.take_error().is_none());
        sink.finish().unwrap();
        drop(sink);

        let conn = rusqlite::Connection::open(&path).unwrap();
        let mut stmt = conn.prepare("SELECT line FROM battle_log ORDER BY seq").unwrap();
        let lines: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(lines, ["a kills b", "c defended"]);
    }
}
