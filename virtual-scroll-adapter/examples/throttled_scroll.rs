// Example: rate-limited window updates driven by a simulated clock.
use virtual_scroll::{FixedLayout, ScrollPhase, Window};
use virtual_scroll_adapter::{ControllerOptions, ScrollController, Throttle};

fn main() {
    let mut c = ScrollController::new(
        ControllerOptions::fixed(FixedLayout::new(100_000, 24.0, 480.0)).with_on_change(Some(
            |w: &Window, phase: ScrollPhase| {
                println!("on_change: {phase:?} range={:?}", w.range());
            },
        )),
    );

    // Scroll events every 4ms, windows at most every 16ms.
    let mut throttle = Throttle::new(16, |c: &mut ScrollController| {
        c.flush();
    });
    for tick in 0..12u64 {
        c.record_scroll(tick as f64 * 150.0);
        throttle.call(&mut c, tick * 4);
    }

    // The last events may have been dropped; flush on scroll end.
    let w = c.flush();
    println!("final: offset={} range={:?}", c.scroll_offset(), w.range());
}
