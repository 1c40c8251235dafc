use std::collections::{HashSet, VecDeque};

use otyugh_core::{CellId, ConfigError, DungeonConfig, SeededRandom};
use otyugh_system_builder::{max_interconnectivity, validate, Layout, TopologyBuilder};
use proptest::prelude::*;

fn config(rows: u32, columns: u32, interconnectivity: u32, wrapping: bool) -> DungeonConfig {
    DungeonConfig {
        rows,
        columns,
        interconnectivity,
        wrapping,
        ..DungeonConfig::default()
    }
}

fn reachable_from_origin(layout: &Layout) -> usize {
    let mut adjacency = vec![Vec::new(); layout.cell_count()];
    for edge in layout.edges() {
        adjacency[edge.from().get() as usize].push(edge.to().get() as usize);
        adjacency[edge.to().get() as usize].push(edge.from().get() as usize);
    }

    let mut seen = HashSet::new();
    let mut frontier = VecDeque::new();
    let _ = seen.insert(0usize);
    frontier.push_back(0usize);
    while let Some(cell) = frontier.pop_front() {
        for &next in &adjacency[cell] {
            if seen.insert(next) {
                frontier.push_back(next);
            }
        }
    }
    seen.len()
}

#[test]
fn tree_layout_has_one_fewer_edge_than_cells() {
    let builder = TopologyBuilder::new(config(6, 6, 0, false)).expect("valid configuration");
    let layout = builder.build(&mut SeededRandom::new(11));

    assert_eq!(layout.edges().len(), 35);
    assert_eq!(layout.interconnectivity(), 0);
    assert_eq!(reachable_from_origin(&layout), 36);
    assert_eq!(
        layout.edges().len() + layout.discarded_edges().len(),
        builder.candidate_edges().len(),
        "every candidate is either kept or discarded",
    );
}

#[test]
fn interconnectivity_reopens_discarded_edges() {
    let builder = TopologyBuilder::new(config(6, 8, 4, true)).expect("valid configuration");
    let layout = builder.build(&mut SeededRandom::new(3));

    assert_eq!(layout.edges().len(), 6 * 8 - 1 + 4);
    let kept: HashSet<_> = layout.edges().iter().copied().collect();
    assert_eq!(kept.len(), layout.edges().len(), "no passage is opened twice");
    assert!(layout
        .discarded_edges()
        .iter()
        .all(|edge| !kept.contains(edge)));
}

#[test]
fn identical_seeds_produce_identical_layouts() {
    let builder = TopologyBuilder::new(config(6, 8, 3, false)).expect("valid configuration");
    let first = builder.build(&mut SeededRandom::new(99));
    let second = builder.build(&mut SeededRandom::new(99));
    assert_eq!(first, second);
}

#[test]
fn empty_grids_are_rejected() {
    assert_eq!(
        validate(&config(0, 6, 0, false)),
        Err(ConfigError::EmptyGrid {
            rows: 0,
            columns: 6
        })
    );
}

#[test]
fn grids_too_small_for_destination_are_rejected() {
    for (rows, columns) in [(3, 3), (1, 5), (5, 1), (2, 2), (2, 4)] {
        assert_eq!(
            validate(&config(rows, columns, 0, false)),
            Err(ConfigError::GridTooSmall { rows, columns }),
            "{rows}x{columns} should be rejected",
        );
    }
    assert!(validate(&config(1, 6, 0, false)).is_ok());
    assert!(validate(&config(2, 5, 0, false)).is_ok());
}

#[test]
fn wrapping_shrinks_the_farthest_destination() {
    assert_eq!(
        validate(&config(5, 5, 0, true)),
        Err(ConfigError::GridTooSmall {
            rows: 5,
            columns: 5
        })
    );
    assert!(validate(&config(6, 6, 0, true)).is_ok());
}

#[test]
fn excessive_interconnectivity_is_rejected() {
    let maximum = max_interconnectivity(4, 4, false);
    assert!(validate(&config(4, 4, maximum, false)).is_ok());
    assert_eq!(
        validate(&config(4, 4, maximum + 1, false)),
        Err(ConfigError::InterconnectivityTooHigh {
            requested: maximum + 1,
            maximum,
        })
    );
}

#[test]
fn percentages_above_one_hundred_are_rejected() {
    let mut invalid = config(6, 6, 0, false);
    invalid.percent_monsters = 101;
    assert_eq!(
        validate(&invalid),
        Err(ConfigError::PercentOutOfRange {
            field: "percent_monsters",
            value: 101,
        })
    );

    invalid.percent_monsters = 100;
    invalid.percent_treasure = 250;
    assert!(matches!(
        TopologyBuilder::new(invalid),
        Err(ConfigError::PercentOutOfRange {
            field: "percent_treasure",
            ..
        })
    ));
}

#[test]
fn maximum_interconnectivity_opens_every_candidate() {
    let maximum = max_interconnectivity(6, 6, true);
    assert_eq!(maximum, 72 - 35);
    let builder = TopologyBuilder::new(config(6, 6, maximum, true)).expect("valid configuration");
    let layout = builder.build(&mut SeededRandom::new(5));
    assert!(layout.discarded_edges().is_empty());
    assert_eq!(layout.edges().len(), builder.candidate_edges().len());
}

proptest! {
    #[test]
    fn successful_builds_are_connected(
        rows in 1u32..9,
        columns in 1u32..9,
        wrapping in any::<bool>(),
        extra in any::<u32>(),
        seed in any::<u64>(),
    ) {
        let maximum = max_interconnectivity(rows, columns, wrapping);
        let interconnectivity = extra % (maximum + 1);
        let candidate = config(rows, columns, interconnectivity, wrapping);
        prop_assume!(validate(&candidate).is_ok());

        let builder = TopologyBuilder::new(candidate).expect("validated configuration");
        let layout = builder.build(&mut SeededRandom::new(seed));

        prop_assert_eq!(
            layout.edges().len(),
            (rows * columns - 1 + interconnectivity) as usize
        );
        prop_assert_eq!(reachable_from_origin(&layout), layout.cell_count());
        for edge in layout.edges() {
            prop_assert!(edge.from() != edge.to());
            prop_assert!(edge.to().get() < rows * columns);
        }
        prop_assert!(layout.id_of(layout.coord_of(CellId::new(0))).is_some());
    }
}
