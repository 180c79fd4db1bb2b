// Example: fixed-height windowing and inline styles.
use virtual_scroll::{FixedLayout, compute_window, container_style, fixed_item_style};

fn main() {
    let layout = FixedLayout::new(1_000_000, 24.0, 480.0);
    let w = compute_window(123_456.0, &layout);

    println!("container: {}", container_style(w.total_height));
    println!(
        "window: start={} end={:?} visible={} offset_y={}",
        w.start_index, w.end_index, w.visible_count, w.offset_y
    );
    for index in w.range().take(3) {
        println!("  #{index}: {}", fixed_item_style(index, layout.item_height));
    }
}
