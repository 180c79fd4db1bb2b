// Example: measurements keyed by item identity survive reorders.
use virtual_scroll::{Identified, ItemKey, ItemPositions, MeasurementCache, default_item_key};

struct Message {
    id: u64,
    lines: usize,
}

impl Identified for Message {
    type Id = u64;

    fn id(&self) -> Option<u64> {
        Some(self.id)
    }
}

fn main() {
    let mut messages: Vec<Message> = (0..5).map(|i| Message { id: 100 + i, lines: 1 }).collect();
    messages[3].lines = 4;

    let mut cache: MeasurementCache<ItemKey<u64>> = MeasurementCache::new(256);
    for (index, m) in messages.iter().enumerate() {
        cache.put(default_item_key(m, index), m.lines as f64 * 18.0);
    }

    // Newest message first: indexes change, keys do not.
    messages.reverse();
    let positions = ItemPositions::build(messages.len(), |i| {
        cache
            .peek(&default_item_key(&messages[i], i))
            .unwrap_or(18.0)
    });
    println!("heights after reverse: {:?}", positions.heights());
    println!("total={}", positions.total_height());
}
