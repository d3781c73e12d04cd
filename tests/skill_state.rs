use skillgrid::graph::Graph;
use skillgrid::snapshot::Snapshot;
use skillgrid::state::{
    is_completed, is_item_completed, is_unlocked, StateOptions, DEFAULT_DEPTH_BUDGET,
};
use skillgrid_test_utils::builders::{BlockBuilder, ItemBuilder, SnapshotBuilder};
use skillgrid_test_utils::init_tracing;

fn graph_from(snapshot: Snapshot) -> Graph {
    Graph::build(snapshot.blocks)
}

#[test]
fn isolated_skill_is_unlocked_and_completed() {
    init_tracing();
    let graph = graph_from(
        SnapshotBuilder::new()
            .block(BlockBuilder::skill(1).build())
            .build(),
    );
    let opts = StateOptions::default();

    let block = graph.block(1).unwrap();
    assert!(is_unlocked(&graph, block, &opts));
    assert!(is_completed(&graph, block, &opts));
}

#[test]
fn completed_essential_parent_unlocks_its_child() {
    init_tracing();
    let graph = graph_from(
        SnapshotBuilder::new()
            .block(
                BlockBuilder::skill(1)
                    .essential(true)
                    .item(ItemBuilder::task(10).completed(true).build())
                    .build(),
            )
            .block(
                BlockBuilder::skill(2)
                    .item(ItemBuilder::task(11).build())
                    .build(),
            )
            .edge(1, 2)
            .build(),
    );
    let opts = StateOptions::default();

    assert!(is_completed(&graph, graph.block(1).unwrap(), &opts));
    assert!(is_unlocked(&graph, graph.block(2).unwrap(), &opts));
    assert!(!is_completed(&graph, graph.block(2).unwrap(), &opts));
}

#[test]
fn incomplete_essential_parent_keeps_its_child_locked() {
    init_tracing();
    let graph = graph_from(
        SnapshotBuilder::new()
            .block(
                BlockBuilder::skill(1)
                    .essential(true)
                    .item(ItemBuilder::task(10).build())
                    .build(),
            )
            .block(BlockBuilder::skill(2).build())
            .edge(1, 2)
            .build(),
    );
    let opts = StateOptions::default();

    assert!(!is_unlocked(&graph, graph.block(2).unwrap(), &opts));
}

#[test]
fn non_essential_parent_gates_by_unlock_not_completion() {
    init_tracing();
    // 1 (essential, incomplete) -> 2 (non-essential, no items) -> 3.
    let graph = graph_from(
        SnapshotBuilder::new()
            .block(
                BlockBuilder::skill(1)
                    .essential(true)
                    .item(ItemBuilder::task(10).build())
                    .build(),
            )
            .block(BlockBuilder::skill(2).build())
            .block(BlockBuilder::skill(3).build())
            .edge(1, 2)
            .edge(2, 3)
            .build(),
    );
    let opts = StateOptions::default();

    // 2 is locked because its essential parent is incomplete; 3 is locked
    // only because its (non-essential) parent 2 is not unlocked.
    assert!(!is_unlocked(&graph, graph.block(2).unwrap(), &opts));
    assert!(!is_unlocked(&graph, graph.block(3).unwrap(), &opts));
    assert!(!is_completed(&graph, graph.block(3).unwrap(), &opts));
}

#[test]
fn dependency_cycle_evaluates_locked_within_budget() {
    init_tracing();
    let graph = graph_from(
        SnapshotBuilder::new()
            .block(BlockBuilder::skill(1).build())
            .block(BlockBuilder::skill(2).build())
            .block(BlockBuilder::skill(3).build())
            .edge(1, 2)
            .edge(2, 3)
            .edge(3, 1)
            .build(),
    );
    let opts = StateOptions {
        depth_budget: 2,
        ..Default::default()
    };

    for id in [1, 2, 3] {
        let block = graph.block(id).unwrap();
        assert!(!is_unlocked(&graph, block, &opts));
        assert!(!is_completed(&graph, block, &opts));
    }
}

#[test]
fn deep_chains_terminate_under_the_default_budget() {
    init_tracing();
    let mut builder = SnapshotBuilder::new();
    for id in 0..200u64 {
        builder = builder.block(BlockBuilder::skill(id).build());
    }
    for id in 0..199u64 {
        builder = builder.edge(id, id + 1);
    }
    let graph = graph_from(builder.build());
    let opts = StateOptions::default();

    // The chain is longer than the budget; the tail evaluates locked
    // instead of overflowing the stack.
    assert!(is_unlocked(&graph, graph.block(0).unwrap(), &opts));
    assert!(!is_unlocked(&graph, graph.block(199).unwrap(), &opts));
}

#[test]
fn a_single_completed_choice_unlocks_but_does_not_complete() {
    init_tracing();
    let graph = graph_from(
        SnapshotBuilder::new()
            .block(
                BlockBuilder::skill(1)
                    .item(
                        ItemBuilder::choice(10, 2)
                            .choice_option(100, true)
                            .choice_option(101, false)
                            .build(),
                    )
                    .build(),
            )
            .build(),
    );
    let opts = StateOptions::default();

    let block = graph.block(1).unwrap();
    assert!(is_unlocked(&graph, block, &opts));
    assert!(!is_completed(&graph, block, &opts));
    assert!(!is_item_completed(&block.items[0]));
}

#[test]
fn choice_task_completes_at_min_choices() {
    init_tracing();
    let item = ItemBuilder::choice(10, 2)
        .choice_option(100, true)
        .choice_option(101, true)
        .choice_option(102, false)
        .build();

    assert!(is_item_completed(&item));
}

#[test]
fn locked_item_blocks_completion_even_when_completed() {
    init_tracing();
    let graph = graph_from(
        SnapshotBuilder::new()
            .block(
                BlockBuilder::skill(1)
                    .item(ItemBuilder::task(10).completed(true).locked(true).build())
                    .build(),
            )
            .build(),
    );
    let opts = StateOptions::default();

    let block = graph.block(1).unwrap();
    assert!(is_unlocked(&graph, block, &opts));
    assert!(!is_completed(&graph, block, &opts));
}

#[test]
fn active_path_scopes_which_tasks_count() {
    init_tracing();
    let graph = graph_from(
        SnapshotBuilder::new()
            .block(
                BlockBuilder::skill(1)
                    .item(ItemBuilder::task(10).path(7).completed(true).build())
                    .item(ItemBuilder::task(11).path(8).build())
                    .build(),
            )
            .build(),
    );
    let block = graph.block(1).unwrap();

    let on_seven = StateOptions {
        active_path: Some(7),
        ..Default::default()
    };
    assert!(is_completed(&graph, block, &on_seven));

    let on_eight = StateOptions {
        active_path: Some(8),
        ..Default::default()
    };
    assert!(!is_completed(&graph, block, &on_eight));

    // Edit mode sees every item, so the off-path incomplete task counts.
    let editing = StateOptions {
        active_path: Some(7),
        edit_mode: true,
        ..Default::default()
    };
    assert!(!is_completed(&graph, block, &editing));
}

#[test]
fn submodule_items_are_not_path_scoped() {
    init_tracing();
    let graph = graph_from(
        SnapshotBuilder::new()
            .block(
                BlockBuilder::submodule(1)
                    .item(ItemBuilder::task(10).path(7).build())
                    .build(),
            )
            .build(),
    );
    let opts = StateOptions {
        active_path: Some(8),
        ..Default::default()
    };

    // The off-path task still gates the submodule's completion.
    assert!(!is_completed(&graph, graph.block(1).unwrap(), &opts));
}

#[test]
fn submodule_unlocks_with_any_unlocked_item() {
    init_tracing();
    let locked = BlockBuilder::submodule(1)
        .item(ItemBuilder::skill_item(10).locked(true).build())
        .item(ItemBuilder::skill_item(11).locked(true).build())
        .build();
    let open = BlockBuilder::submodule(2)
        .item(ItemBuilder::skill_item(12).locked(true).build())
        .item(ItemBuilder::skill_item(13).build())
        .build();
    let empty = BlockBuilder::submodule(3).build();
    let graph = graph_from(
        SnapshotBuilder::new()
            .block(locked)
            .block(open)
            .block(empty)
            .build(),
    );
    let opts = StateOptions::default();

    assert!(!is_unlocked(&graph, graph.block(1).unwrap(), &opts));
    assert!(is_unlocked(&graph, graph.block(2).unwrap(), &opts));
    assert!(!is_unlocked(&graph, graph.block(3).unwrap(), &opts));
}

#[test]
fn block_absent_from_the_visible_graph_is_vacuously_unlocked() {
    init_tracing();
    let graph = graph_from(
        SnapshotBuilder::new()
            .block(BlockBuilder::skill(1).build())
            .build(),
    );
    let opts = StateOptions::default();

    // Hidden from the graph, its listed parents do not gate it.
    let outside = BlockBuilder::skill(99).parent(1).build();
    assert!(is_unlocked(&graph, &outside, &opts));
}

#[test]
fn essential_skill_items_gate_completion_non_essential_do_not() {
    init_tracing();
    let graph = graph_from(
        SnapshotBuilder::new()
            .block(
                BlockBuilder::skill(1)
                    .item(ItemBuilder::skill_item(10).essential(true).build())
                    .build(),
            )
            .block(
                BlockBuilder::skill(2)
                    .item(ItemBuilder::skill_item(11).build())
                    .build(),
            )
            .build(),
    );
    let opts = StateOptions::default();

    assert!(!is_completed(&graph, graph.block(1).unwrap(), &opts));
    assert!(is_completed(&graph, graph.block(2).unwrap(), &opts));
}

#[test]
fn default_options_carry_the_documented_budget() {
    let opts = StateOptions::default();
    assert_eq!(opts.depth_budget, DEFAULT_DEPTH_BUDGET);
    assert_eq!(DEFAULT_DEPTH_BUDGET, 100);
}
