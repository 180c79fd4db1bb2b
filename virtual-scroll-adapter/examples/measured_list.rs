// Example: dynamic heights, measurement after layout and keyed rendering.
use virtual_scroll::{Align, DynamicLayout};
use virtual_scroll_adapter::{ControllerOptions, ScrollController};

fn main() {
    let items: Vec<String> = (0..1_000).map(|i| format!("item {i}")).collect();
    let mut c = ScrollController::new(
        ControllerOptions::dynamic(DynamicLayout::new(items.len(), 30.0, 300.0), |_| 30.0)
            .with_item_key(|i| i as u32),
    );

    c.scroll_to_index(500, Align::Center);
    println!("offset={} range={:?}", c.scroll_offset(), c.window().range());

    // Pretend the UI laid out the rendered items; item 490 is above the viewport.
    let laid_out = c
        .window()
        .range()
        .map(|i| (i, if i % 2 == 0 { 45.0 } else { 30.0 }));
    let adjust = c.measure_many(laid_out);
    println!("measured: adjust={adjust} offset={}", c.scroll_offset());

    for row in c.render(&items, |_, i| i, |item, _| item.clone()).iter().take(3) {
        println!("  key={} {} -> {}", row.key, row.output, row.style);
    }
    println!("container: {}", c.container_style());
}
