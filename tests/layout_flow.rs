use skillgrid::snapshot::{Block, BlockKind};
use skillgrid::types::{PlacementMode, Point};
use skillgrid::{compute_layout, CircuitLayout};
use skillgrid_test_utils::builders::{checkpoint, day, group, BlockBuilder, SnapshotBuilder};
use skillgrid_test_utils::init_tracing;

fn learner_visible(block: &Block) -> bool {
    !matches!(block.kind, BlockKind::Skill { hidden: true, .. })
}

#[test]
fn layout_covers_visible_placed_blocks_only() {
    init_tracing();
    let snapshot = SnapshotBuilder::new()
        .block(BlockBuilder::skill(1).column(0).build())
        .block(BlockBuilder::skill(2).column(0).build())
        .block(BlockBuilder::skill(3).column(0).hidden(true).build())
        .block(BlockBuilder::skill(4).build())
        .edge(1, 2)
        .edge(1, 3)
        .build();

    let CircuitLayout { rows, .. } =
        compute_layout(&snapshot, learner_visible, PlacementMode::Simple).unwrap();

    // The hidden 3 and the unplaced 4 never reach the placer.
    assert_eq!(rows.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(rows[&1], 0);
    assert_eq!(rows[&2], 1);
}

#[test]
fn blobs_follow_the_assigned_positions() {
    init_tracing();
    let snapshot = SnapshotBuilder::new()
        .block(BlockBuilder::skill(1).column(0).build())
        .block(BlockBuilder::skill(2).column(1).build())
        .edge(1, 2)
        .group(group(1, "basics", &[1, 2]))
        .build();

    let layout = compute_layout(&snapshot, |_| true, PlacementMode::Simple).unwrap();

    assert_eq!(layout.blobs.len(), 1);
    let blob = &layout.blobs[0];
    assert_eq!(blob.min, Point::new(0, 0));
    assert_eq!(blob.max, Point::new(1, 1));
    assert_eq!(blob.allocations.len(), 4);
}

#[test]
fn hiding_a_member_shrinks_its_blob() {
    init_tracing();
    let snapshot = SnapshotBuilder::new()
        .block(BlockBuilder::skill(1).column(0).build())
        .block(BlockBuilder::skill(2).column(1).hidden(true).build())
        .group(group(1, "basics", &[1, 2]))
        .build();

    let layout = compute_layout(&snapshot, learner_visible, PlacementMode::Simple).unwrap();

    assert_eq!(layout.blobs.len(), 1);
    assert_eq!(layout.blobs[0].allocations.len(), 1);
    assert_eq!(layout.blobs[0].allocations[0].block, Some(1));
}

#[test]
fn checkpoint_staged_mode_threads_the_snapshot_checkpoints() {
    init_tracing();
    let snapshot = SnapshotBuilder::new()
        .block(BlockBuilder::skill(1).column(0).checkpoint(10).build())
        .block(BlockBuilder::skill(2).column(1).build())
        .checkpoint(checkpoint(10, day(10)))
        .build();

    let staged =
        compute_layout(&snapshot, |_| true, PlacementMode::CheckpointStaged).unwrap();
    let simple = compute_layout(&snapshot, |_| true, PlacementMode::Simple).unwrap();

    // The unclaimed 2 waits for the final wave above the risen floor.
    assert_eq!(staged.rows[&1], 0);
    assert_eq!(staged.rows[&2], 1);
    assert_eq!(simple.rows[&2], 0);
}

#[test]
fn identical_input_yields_identical_layout() {
    init_tracing();
    let build = || {
        SnapshotBuilder::new()
            .block(BlockBuilder::skill(3).column(0).build())
            .block(BlockBuilder::skill(1).column(1).build())
            .block(BlockBuilder::skill(2).column(0).build())
            .edge(1, 2)
            .edge(3, 2)
            .group(group(1, "g", &[1, 2, 3]))
            .build()
    };

    let a = compute_layout(&build(), |_| true, PlacementMode::Simple).unwrap();
    let b = compute_layout(&build(), |_| true, PlacementMode::Simple).unwrap();

    assert_eq!(a.rows, b.rows);
    let points = |l: &CircuitLayout| -> Vec<Point> {
        l.blobs
            .iter()
            .flat_map(|blob| blob.allocations.iter().map(|al| al.point))
            .collect()
    };
    assert_eq!(points(&a), points(&b));
}
