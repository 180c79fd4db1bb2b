use crate::*;

use std::string::String;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::vec::Vec;

use virtual_scroll::{
    Align, DynamicLayout, FixedLayout, FrameState, Identified, ItemKey, ItemPositions,
    ScrollPhase, ScrollState, compute_window, default_item_key,
};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        start + (self.next_u64() % (end_exclusive - start) as u64) as usize
    }
}

fn fixed_controller(count: usize, item_height: f64, container: f64) -> ScrollController {
    ScrollController::new(ControllerOptions::fixed(FixedLayout::new(
        count,
        item_height,
        container,
    )))
}

fn counting_controller(
    options: ControllerOptions,
) -> (ScrollController, Arc<AtomicUsize>, Arc<Mutex<Vec<ScrollPhase>>>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let phases = Arc::new(Mutex::new(Vec::new()));
    let c = ScrollController::new(options.with_on_change(Some({
        let calls = Arc::clone(&calls);
        let phases = Arc::clone(&phases);
        move |_: &virtual_scroll::Window, phase: ScrollPhase| {
            calls.fetch_add(1, Ordering::Relaxed);
            phases.lock().unwrap().push(phase);
        }
    })));
    (c, calls, phases)
}

#[derive(Clone, Debug)]
struct Row {
    id: Option<u32>,
    label: String,
}

impl Identified for Row {
    type Id = u32;

    fn id(&self) -> Option<u32> {
        self.id
    }
}

fn rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| Row {
            id: (i % 2 == 0).then_some(100 + i as u32),
            label: format!("row {i}"),
        })
        .collect()
}

#[test]
fn on_scroll_recomputes_fixed_window() {
    let mut c = fixed_controller(1000, 50.0, 500.0);
    assert_eq!(c.window().range(), 0..16);
    assert_eq!(c.total_height(), 50_000.0);

    let w = c.on_scroll(5000.0);
    assert_eq!(w.start_index, 95);
    assert_eq!(w.end_index, Some(115));
    assert_eq!(w.offset_y, 4750.0);
    assert_eq!(c.phase(), ScrollPhase::Idle);
    assert_eq!(c.scroll_offset(), 5000.0);
    assert!(c.positions().is_none());
}

#[test]
fn record_scroll_defers_until_flush() {
    let mut c = fixed_controller(1000, 50.0, 500.0);

    c.record_scroll(5000.0);
    assert!(c.is_scrolling());
    assert_eq!(c.window().range(), 0..16);

    c.record_scroll(5100.0);
    let w = c.flush();
    assert_eq!(c.phase(), ScrollPhase::Idle);
    assert_eq!(w, compute_window(5100.0, &FixedLayout::new(1000, 50.0, 500.0)));

    // Idle flush is a no-op.
    assert_eq!(c.flush(), w);
}

#[test]
fn scroll_events_notify_once_and_report_phases() {
    let (mut c, calls, phases) =
        counting_controller(ControllerOptions::fixed(FixedLayout::new(100, 10.0, 50.0)));

    c.on_scroll(30.0);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(*phases.lock().unwrap(), [ScrollPhase::Idle]);

    // No-op scroll and setters do not notify.
    c.on_scroll(30.0);
    c.set_container_height(50.0);
    c.set_overscan(5);
    c.set_item_count(100);
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    c.record_scroll(40.0);
    c.record_scroll(45.0);
    c.flush();
    assert_eq!(calls.load(Ordering::Relaxed), 3);
    assert_eq!(*phases.lock().unwrap(), [
        ScrollPhase::Idle,
        ScrollPhase::Scrolling,
        ScrollPhase::Idle
    ]);
}

#[test]
fn batch_update_coalesces_and_is_nestable() {
    let (mut c, calls, _) =
        counting_controller(ControllerOptions::fixed(FixedLayout::new(100, 10.0, 50.0)));

    c.batch_update(|c| {
        c.set_container_height(80.0);
        c.batch_update(|c| {
            c.on_scroll(120.0);
            c.set_overscan(1);
        });
    });
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(c.window().range(), 11..22);
}

#[test]
fn dynamic_positions_are_not_rebuilt_on_scroll() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut c = ScrollController::new(ControllerOptions::dynamic(
        DynamicLayout::new(100, 20.0, 100.0),
        {
            let calls = Arc::clone(&calls);
            move |_| {
                calls.fetch_add(1, Ordering::Relaxed);
                20.0
            }
        },
    ));
    assert_eq!(calls.load(Ordering::Relaxed), 100);

    for step in 0..50 {
        c.on_scroll(step as f64 * 37.0);
    }
    assert_eq!(calls.load(Ordering::Relaxed), 100);

    // Growing asks only for the new items.
    c.set_item_count(150);
    assert_eq!(calls.load(Ordering::Relaxed), 150);
    assert_eq!(c.total_height(), 3000.0);

    c.set_item_count(10);
    assert_eq!(calls.load(Ordering::Relaxed), 150);
    assert_eq!(c.total_height(), 200.0);

    c.set_heights_with(|i| if i % 2 == 0 { 100.0 } else { 50.0 });
    assert_eq!(c.total_height(), 750.0);
    assert_eq!(c.positions().unwrap().as_slice()[..4], [0.0, 100.0, 150.0, 250.0]);
}

#[test]
fn measure_above_viewport_keeps_content_anchored() {
    let mut c = ScrollController::new(ControllerOptions::dynamic(
        DynamicLayout::new(100, 10.0, 50.0).with_overscan(0),
        |_| 10.0,
    ));
    c.on_scroll(200.0);
    assert_eq!(c.window().start_index, 20);

    // Item 5 is above the viewport: the offset follows its growth.
    assert_eq!(c.measure(5, 30.0), 20.0);
    assert_eq!(c.scroll_offset(), 220.0);
    assert_eq!(c.window().start_index, 20);

    // Item 50 is below: no adjustment.
    assert_eq!(c.measure(50, 40.0), 0.0);
    assert_eq!(c.scroll_offset(), 220.0);
    assert_eq!(c.total_height(), 1050.0);

    // Same height again is a no-op.
    assert_eq!(c.measure(50, 40.0), 0.0);
    assert_eq!(c.measurement_cache().len(), 2);

    // Out-of-range measurements are ignored.
    assert_eq!(c.measure(1000, 40.0), 0.0);
    assert_eq!(c.measurement_cache().len(), 2);
}

#[test]
fn measure_many_applies_with_one_notification() {
    let (mut c, calls, _) = counting_controller(ControllerOptions::dynamic(
        DynamicLayout::new(20, 10.0, 50.0),
        |_| 10.0,
    ));
    c.on_scroll(100.0);
    let before = calls.load(Ordering::Relaxed);

    let applied = c.measure_many([(0, 20.0), (1, 20.0), (15, 5.0)]);
    assert_eq!(applied, 20.0);
    assert_eq!(calls.load(Ordering::Relaxed), before + 1);
    assert_eq!(c.total_height(), 215.0);
}

#[test]
fn fixed_layouts_ignore_measurements() {
    let mut c = fixed_controller(10, 10.0, 50.0);
    assert_eq!(c.measure(2, 40.0), 0.0);
    assert_eq!(c.total_height(), 100.0);
    assert!(c.measurement_cache().is_empty());
}

#[test]
fn measurements_follow_keys_across_reorder_and_count_changes() {
    let mut c = ScrollController::new(
        ControllerOptions::dynamic(DynamicLayout::new(5, 10.0, 50.0), |_| 10.0)
            .with_item_key(|i| 1000u64 + i as u64),
    );
    c.measure(0, 50.0);
    c.measure(3, 40.0);
    assert_eq!(c.item_height(0), Some(50.0));

    // Swap the first two items.
    c.set_item_key(|i| match i {
        0 => 1001,
        1 => 1000,
        _ => 1000 + i as u64,
    });
    assert_eq!(c.item_height(0), Some(10.0));
    assert_eq!(c.item_height(1), Some(50.0));

    c.set_item_count(2);
    assert_eq!(c.item_height(3), None);
    c.set_item_count(5);
    assert_eq!(c.item_height(3), Some(40.0));
    assert_eq!(c.total_height(), 50.0 + 10.0 + 10.0 + 40.0 + 10.0);

    c.reset_measurements();
    assert!(c.measurement_cache().is_empty());
    assert_eq!(c.total_height(), 50.0);
}

#[test]
fn measurement_cache_capacity_is_respected() {
    let mut c = ScrollController::new(
        ControllerOptions::dynamic(DynamicLayout::new(10, 10.0, 50.0), |_| 10.0)
            .with_measurement_cache_capacity(2),
    );
    c.measure(0, 11.0);
    c.measure(1, 12.0);
    c.measure(2, 13.0);
    assert_eq!(c.measurement_cache().len(), 2);
    assert!(!c.measurement_cache().contains(&0));

    // Evicted measurements fall back to the height source on rebuild.
    c.sync_item_keys();
    assert_eq!(c.item_height(0), Some(10.0));
    assert_eq!(c.item_height(2), Some(13.0));
}

#[test]
fn set_item_height_updates_fixed_height_and_dynamic_estimate() {
    let mut c = fixed_controller(10, 10.0, 50.0);
    c.set_item_height(20.0);
    assert_eq!(c.total_height(), 200.0);
    assert_eq!(c.item_start(3), Some(60.0));

    let mut d = ScrollController::new(ControllerOptions::dynamic(
        DynamicLayout::new(100, 10.0, 50.0).with_overscan(2),
        |_| 10.0,
    ));
    d.on_scroll(500.0);
    assert_eq!(d.window().start_index, 46);
    d.set_item_height(0.0);
    assert_eq!(d.window().start_index, 48);
    assert_eq!(d.total_height(), 1000.0);
}

#[test]
fn scroll_to_index_offsets_respect_alignment_and_clamp() {
    let mut c = fixed_controller(100, 10.0, 50.0);

    assert_eq!(c.scroll_to_index_offset(30, Align::Start), 300.0);
    assert_eq!(c.scroll_to_index_offset(30, Align::End), 260.0);
    assert_eq!(c.scroll_to_index_offset(30, Align::Center), 280.0);
    assert_eq!(c.scroll_to_index_offset(99, Align::Start), 950.0);
    assert_eq!(c.scroll_to_index_offset(5_000, Align::End), 950.0);
    assert_eq!(c.scroll_to_index_offset(0, Align::End), 0.0);

    c.on_scroll(280.0);
    assert_eq!(c.scroll_to_index_offset(30, Align::Auto), 280.0);
    assert_eq!(c.scroll_to_index_offset(40, Align::Auto), 360.0);
    assert_eq!(c.scroll_to_index_offset(10, Align::Auto), 100.0);

    assert_eq!(c.scroll_to_index(70, Align::Start), 700.0);
    assert_eq!(c.scroll_offset(), 700.0);
    assert!(c.window().contains(70));

    let empty = fixed_controller(0, 10.0, 50.0);
    assert_eq!(empty.scroll_to_index_offset(3, Align::Center), 0.0);
    assert_eq!(empty.max_scroll_offset(), 0.0);
}

#[test]
fn clamp_scroll_offset_handles_overscroll() {
    let c = fixed_controller(10, 10.0, 50.0);
    assert_eq!(c.max_scroll_offset(), 50.0);
    assert_eq!(c.clamp_scroll_offset(-20.0), 0.0);
    assert_eq!(c.clamp_scroll_offset(80.0), 50.0);
    assert_eq!(c.clamp_scroll_offset(f64::NAN), 0.0);

    // Content shorter than the container cannot scroll.
    let short = fixed_controller(2, 10.0, 50.0);
    assert_eq!(short.max_scroll_offset(), 0.0);
}

#[test]
fn styles_follow_layout() {
    let c = fixed_controller(100, 10.0, 50.0);
    let s = c.item_style(3).unwrap();
    assert_eq!(s.top, 30.0);
    assert_eq!(s.height, Some(10.0));
    assert_eq!(c.item_style(100), None);
    assert_eq!(c.container_style().height, 1000.0);

    let d = ScrollController::new(ControllerOptions::dynamic(
        DynamicLayout::new(3, 10.0, 50.0),
        |i| [5.0, 15.0, 25.0][i],
    ));
    let s = d.item_style(2).unwrap();
    assert_eq!(s.top, 20.0);
    assert_eq!(s.height, None);
    assert_eq!(
        d.container_style().to_string(),
        "position: relative; height: 45px; overflow-y: auto;"
    );
}

#[test]
fn render_maps_window_to_keys_and_styles() {
    let items = rows(20);
    let mut c = ScrollController::new(ControllerOptions::fixed(
        FixedLayout::new(20, 10.0, 30.0).with_overscan(1),
    ));
    c.on_scroll(50.0);

    let mut rendered_calls = 0;
    let out = c.render(&items, default_item_key, |row, index| {
        rendered_calls += 1;
        format!("{}@{index}", row.label)
    });

    assert_eq!(rendered_calls, 6);
    let indexes: Vec<usize> = out.iter().map(|r| r.index).collect();
    assert_eq!(indexes, [4, 5, 6, 7, 8, 9]);
    assert_eq!(out[0].key, ItemKey::Id(104));
    assert_eq!(out[1].key, ItemKey::Index(5));
    assert_eq!(out[1].output, "row 5@5");
    assert_eq!(out[2].style.top, 60.0);
}

#[test]
fn render_skips_indexes_beyond_items() {
    let items = rows(3);
    let c = fixed_controller(10, 10.0, 100.0);

    let mut out = Vec::new();
    render_window_into(
        &items,
        &c.window(),
        c.placement(),
        |_, i| i,
        |row, _| row.label.clone(),
        &mut out,
    );
    assert_eq!(out.len(), 3);

    assert_eq!(out[2].output, "row 2");

    // The buffer is cleared before reuse.
    render_window_into(
        &items[..1],
        &c.window(),
        c.placement(),
        |_, i| i,
        |row, _| row.label.clone(),
        &mut out,
    );
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].key, 0);
}

#[test]
fn render_dynamic_leaves_height_to_content() {
    let items = rows(4);
    let positions = ItemPositions::from_heights(&[100.0, 50.0, 100.0, 50.0]);
    let window = positions.window(0.0, &DynamicLayout::new(4, 75.0, 120.0));

    let out = render_window(
        &items,
        &window,
        Placement::Dynamic(&positions),
        default_item_key,
        |_, _| (),
    );
    let tops: Vec<f64> = out.iter().map(|r| r.style.top).collect();
    assert_eq!(tops, [0.0, 100.0, 150.0, 250.0]);
    assert!(out.iter().all(|r| r.style.height.is_none()));
}

#[test]
fn throttle_drops_calls_inside_interval() {
    let mut seen = Vec::new();
    {
        let mut t = Throttle::new(16, |v: u32| seen.push(v));
        assert!(t.call(1, 0));
        assert!(!t.call(2, 10));
        assert!(t.call(3, 16));
        assert_eq!(t.last_invoked_ms(), Some(16));
        assert!(!t.call(4, 20));
        t.reset();
        assert!(t.call(5, 21));
        assert_eq!(t.interval_ms(), 16);
    }
    assert_eq!(seen, [1, 3, 5]);

    let mut count = 0;
    let mut always = Throttle::new(0, |_: ()| count += 1);
    for now in [0, 0, 1] {
        assert!(always.call((), now));
    }
    drop(always);
    assert_eq!(count, 3);
}

#[test]
fn debounce_fires_after_quiet_period() {
    let mut seen = Vec::new();
    {
        let mut d = Debounce::new(100, |v: u32| seen.push(v));
        assert!(!d.poll(0));

        d.call(1, 0);
        d.call(2, 50);
        assert_eq!(d.deadline_ms(), Some(150));
        assert!(!d.poll(120));
        assert!(d.poll(150));
        assert!(!d.is_pending());
        assert!(!d.poll(1_000));

        d.call(3, 200);
        assert_eq!(d.cancel(), Some(3));
        assert!(!d.poll(400));

        d.call(4, 500);
        assert!(d.flush());
        assert!(!d.flush());
        assert_eq!(d.wait_ms(), 100);
    }
    assert_eq!(seen, [2, 4]);
}

#[test]
fn throttled_flush_uses_latest_offset() {
    let layout = FixedLayout::new(1000, 10.0, 100.0);
    let mut c = ScrollController::new(ControllerOptions::fixed(layout));
    let mut throttle = Throttle::new(16, |c: &mut ScrollController| {
        c.flush();
    });

    for now in (0..=40u64).step_by(4) {
        c.record_scroll((now / 4 * 10) as f64);
        throttle.call(&mut c, now);
    }

    // Last flush happened at t=32 (offset 80); offset 100 is still pending.
    assert!(c.is_scrolling());
    assert_eq!(c.window(), compute_window(80.0, &layout));
    assert_eq!(c.flush(), compute_window(100.0, &layout));
}

#[test]
fn debounced_scroll_recomputes_once() {
    let layout = FixedLayout::new(1000, 10.0, 100.0);
    let (mut c, calls, _) = counting_controller(ControllerOptions::fixed(layout));
    {
        let mut d = Debounce::new(50, |offset: f64| {
            c.on_scroll(offset);
        });
        for (now, offset) in [(0, 10.0), (10, 20.0), (20, 30.0)] {
            d.call(offset, now);
            d.poll(now);
        }
        assert!(d.poll(70));
    }
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(c.scroll_offset(), 30.0);
}

#[test]
fn frame_state_roundtrips_and_clamps() {
    let mut c = fixed_controller(100, 10.0, 50.0);
    c.on_scroll(300.0);
    let frame = c.frame_state();
    assert_eq!(frame.scroll.phase, ScrollPhase::Idle);

    let mut restored = fixed_controller(100, 10.0, 20.0);
    restored.restore_frame_state(frame);
    assert_eq!(restored.scroll_state(), c.scroll_state());
    assert_eq!(restored.window(), c.window());

    restored.restore_frame_state(FrameState {
        container_height: 50.0,
        scroll: ScrollState {
            offset: 5000.0,
            phase: ScrollPhase::Scrolling,
        },
    });
    assert_eq!(restored.scroll_offset(), 950.0);
    assert_eq!(restored.phase(), ScrollPhase::Idle);
}

#[test]
fn initial_offset_is_applied() {
    let c = ScrollController::new(
        ControllerOptions::fixed(FixedLayout::new(1000, 50.0, 500.0)).with_initial_offset(5000.0),
    );
    assert_eq!(c.window().start_index, 95);
}

#[test]
fn property_measured_controller_matches_rebuilt_index() {
    for seed in [5u64, 77, 4242] {
        let mut rng = Lcg::new(seed);
        let count = rng.gen_range_usize(1, 400);
        let layout = DynamicLayout::new(count, 20.0, 300.0).with_overscan(rng.gen_range_usize(0, 4));
        let mut c = ScrollController::new(ControllerOptions::dynamic(layout, |_| 20.0));
        let mut heights = vec![20.0; count];

        for _ in 0..200 {
            if rng.gen_range_usize(0, 3) == 0 {
                let index = rng.gen_range_usize(0, count);
                let height = rng.gen_range_usize(0, 80) as f64;
                c.measure(index, height);
                heights[index] = height;
            } else {
                let total = c.total_height() as usize;
                c.on_scroll(rng.gen_range_usize(0, total + 1) as f64);
            }

            let expected = ItemPositions::from_heights(&heights);
            assert_eq!(c.positions(), Some(&expected));
            assert_eq!(c.window(), expected.window(c.scroll_offset(), &layout));
        }
    }
}

#[test]
fn example_throttled_scroll_smoke() {
    let items = rows(10_000);
    let mut c = ScrollController::new(ControllerOptions::fixed(FixedLayout::new(
        items.len(),
        24.0,
        480.0,
    )));
    let mut throttle = Throttle::new(16, |c: &mut ScrollController| {
        c.flush();
    });

    let mut now = 0u64;
    let mut offset = 0.0;
    while offset < 24.0 * 5_000.0 {
        c.record_scroll(offset);
        throttle.call(&mut c, now);
        now += 5;
        offset += 120.0;
    }
    c.flush();

    let out = c.render(&items, default_item_key, |row, _| row.label.len());
    assert!(!out.is_empty());
    assert!(out.len() <= c.window().visible_count);
    assert!(out.iter().all(|r| c.window().contains(r.index)));
}
