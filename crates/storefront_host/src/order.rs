//! Order references for checkouts placed in this browser session.

use std::cell::Cell;

thread_local! {
    static ORDERS_PLACED: Cell<u32> = const { Cell::new(0) };
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reference and wall-clock time assigned to a newly placed order.
pub struct OrderStamp {
    /// Display reference, `ORD-<placed_at_unix_ms>-<sequence>`.
    pub reference: String,
    /// When the order was placed, in unix milliseconds.
    pub placed_at_unix_ms: u64,
    /// 1-based position of this order among those placed on the current thread.
    pub sequence: u32,
}

/// Issues the stamp for the next order.
///
/// The sequence component keeps references distinct even when two orders share a millisecond.
pub fn next_order_stamp() -> OrderStamp {
    let sequence = ORDERS_PLACED.with(|placed| {
        let next = placed.get().wrapping_add(1).max(1);
        placed.set(next);
        next
    });
    let placed_at_unix_ms = wall_clock_ms();
    OrderStamp {
        reference: format!("ORD-{placed_at_unix_ms}-{sequence:04}"),
        placed_at_unix_ms,
        sequence,
    }
}

#[cfg(target_arch = "wasm32")]
fn wall_clock_ms() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn wall_clock_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_carry_increasing_sequence_in_reference() {
        let first = next_order_stamp();
        let second = next_order_stamp();

        assert_eq!(second.sequence, first.sequence + 1);
        assert_ne!(first.reference, second.reference);
        assert!(second
            .reference
            .ends_with(&format!("-{:04}", second.sequence)));
        assert!(first
            .reference
            .starts_with(&format!("ORD-{}-", first.placed_at_unix_ms)));
        assert!(second.placed_at_unix_ms >= first.placed_at_unix_ms);
    }
}
