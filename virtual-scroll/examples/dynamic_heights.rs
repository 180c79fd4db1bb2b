// Example: variable item heights with a retained position index.
use virtual_scroll::{DynamicLayout, compute_dynamic_window, dynamic_item_style};

fn main() {
    let layout = DynamicLayout::new(10_000, 40.0, 600.0).with_overscan(3);
    let height = |i: usize| if i % 7 == 0 { 120.0 } else { 32.0 };

    // Build once: O(n).
    let first = compute_dynamic_window(0.0, &layout, height);
    let mut positions = first.item_positions;
    println!("total={} first={:?}", positions.total_height(), first.window.range());

    // Scroll ticks reuse the index: O(log n).
    for offset in [1_000.0, 50_000.0, 1e9] {
        let w = positions.window(offset, &layout);
        println!("scroll={offset}: range={:?} offset_y={}", w.range(), w.offset_y);
    }

    // A measurement only shifts positions after the measured item.
    let delta = positions.set_height(0, 300.0);
    println!("set_height(0): delta={delta} total={}", positions.total_height());
    if let Some(style) = dynamic_item_style(1, &positions) {
        println!("item 1: {style}");
    }
}
