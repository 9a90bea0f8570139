//! Which requests an event issues, and in what order

use crate::defaults::{
    M1_ITEMS_PATH, M1_SPACED_RESOURCE, M2_ITEMS_PATH, M2_SPACED_RESOURCE, SPACED_RESOURCE_PERIOD,
};
use crate::error::Result;
use crate::models::GatewayRequest;
use std::io::Write;

/// A request and whether the generator pauses after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRequest {
    pub request: GatewayRequest,
    pub pause_after: bool,
}

/// Requests of event `event`: m1, pause, m2, pause, then on every 7th event
/// the two spaced resources back to back
pub fn event_requests(host: &str, event: u64) -> Vec<PlannedRequest> {
    let mut planned = vec![
        PlannedRequest {
            request: GatewayRequest::new(host, M1_ITEMS_PATH, format!("m1-{}", event)),
            pause_after: true,
        },
        PlannedRequest {
            request: GatewayRequest::new(host, M2_ITEMS_PATH, format!("m2-{}", event)),
            pause_after: true,
        },
    ];

    if has_spaced_requests(event) {
        planned.push(PlannedRequest {
            request: GatewayRequest::new(host, M1_ITEMS_PATH, M1_SPACED_RESOURCE),
            pause_after: false,
        });
        planned.push(PlannedRequest {
            request: GatewayRequest::new(host, M2_ITEMS_PATH, M2_SPACED_RESOURCE),
            pause_after: false,
        });
    }

    planned
}

pub fn has_spaced_requests(event: u64) -> bool {
    event % SPACED_RESOURCE_PERIOD == 0
}

/// `2*count + 2*ceil(count/7)`, saturating at `u64::MAX`
pub fn expected_request_count(event_count: u64) -> u64 {
    event_count
        .saturating_mul(2)
        .saturating_add(event_count.div_ceil(SPACED_RESOURCE_PERIOD).saturating_mul(2))
}

/// Every request of a run, in order
pub fn run_plan(host: &str, event_count: u64) -> impl Iterator<Item = PlannedRequest> + '_ {
    (0..event_count).flat_map(move |event| event_requests(host, event))
}

/// Write the run plan as `GET <url>` lines; returns how many were written
pub fn write_plan<W: Write>(host: &str, event_count: u64, out: &mut W) -> Result<u64> {
    let mut written = 0;
    for planned in run_plan(host, event_count) {
        writeln!(out, "{}", planned.request)?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}
