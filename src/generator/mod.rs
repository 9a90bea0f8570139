//! The traffic loop
//!
//! For every event the generator sends the m1 item request, pauses, sends
//! the m2 item request and pauses again; every 7th event (starting with the
//! first) it also requests the two spaced resources without pausing. Each
//! response body is written to the output as one line. The first failed
//! request ends the run.

pub mod jitter;
pub mod plan;

pub use jitter::{Jitter, JitterPacer, Pacer};
pub use plan::{PlannedRequest, event_requests, expected_request_count, run_plan, write_plan};

use crate::{
    client::GatewayClient,
    error::Result,
    logging::Logger,
    models::RunSummary,
};
use std::io::Write;
use std::time::Instant;

/// Sequential traffic generator for one gateway
pub struct TrafficGenerator<C, P> {
    client: C,
    pacer: P,
    gateway: String,
    logger: Logger,
}

impl<C: GatewayClient, P: Pacer> TrafficGenerator<C, P> {
    pub fn new(client: C, pacer: P, gateway: impl Into<String>, logger: Logger) -> Self {
        Self {
            client,
            pacer,
            gateway: gateway.into(),
            logger,
        }
    }

    pub fn gateway(&self) -> &str {
        &self.gateway
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Run `event_count` events, writing each response body to `out`
    pub async fn run<W: Write>(&mut self, event_count: u64, out: &mut W) -> Result<RunSummary> {
        let started = Instant::now();
        let mut summary = RunSummary::default();

        self.logger.info("Starting traffic run")
            .field("gateway", &self.gateway)
            .field("events", event_count)
            .field("expected_requests", expected_request_count(event_count))
            .log()
            .await;

        for event in 0..event_count {
            let correlation_id = Logger::new_correlation_id();

            for planned in event_requests(&self.gateway, event) {
                let response = match self.client.get(&planned.request).await {
                    Ok(response) => response,
                    Err(error) => {
                        self.logger.error("Request failed, aborting run")
                            .correlation_id(&correlation_id)
                            .request(&planned.request)
                            .field("event", event)
                            .error_info(&error)
                            .log()
                            .await;
                        return Err(error);
                    }
                };

                out.write_all(&response.body)?;
                out.write_all(b"\n")?;
                out.flush()?;

                summary.requests_sent += 1;
                if !response.is_success() {
                    summary.non_success_responses += 1;
                }

                self.logger.debug("Response received")
                    .correlation_id(&correlation_id)
                    .request(&planned.request)
                    .response(&response)
                    .field("event", event)
                    .log()
                    .await;

                if planned.pause_after {
                    summary.total_pause += self.pacer.pause().await;
                }
            }

            summary.events += 1;
        }

        summary.elapsed = started.elapsed();

        self.logger.info("Traffic run complete")
            .field("events", summary.events)
            .field("requests_sent", summary.requests_sent)
            .field("non_success_responses", summary.non_success_responses)
            .field("elapsed_ms", summary.elapsed_ms())
            .log()
            .await;

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{GatewayRequest, GatewayResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Answers every request with its own target; can be told to fail
    #[derive(Default)]
    struct RecordingClient {
        requests: Mutex<Vec<GatewayRequest>>,
        fail_on: Option<usize>,
        status: Option<u16>,
    }

    impl RecordingClient {
        fn seen(&self) -> Vec<GatewayRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GatewayClient for RecordingClient {
        async fn get(&self, request: &GatewayRequest) -> Result<GatewayResponse> {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            if Some(requests.len()) == self.fail_on {
                return Err(AppError::network("connection refused"));
            }
            Ok(GatewayResponse {
                status_code: self.status.unwrap_or(200),
                body: request.target().into_bytes(),
                elapsed: Duration::from_millis(1),
            })
        }
    }

    /// Records requested pauses without sleeping
    #[derive(Default)]
    struct RecordingPacer {
        pauses: Vec<Duration>,
        jitter: Jitter,
        rng_seed: u64,
    }

    #[async_trait]
    impl Pacer for RecordingPacer {
        async fn pause(&mut self) -> Duration {
            use rand::SeedableRng;
            self.rng_seed += 1;
            let mut rng = rand::rngs::StdRng::seed_from_u64(self.rng_seed);
            let delay = self.jitter.sample(&mut rng);
            self.pauses.push(delay);
            delay
        }
    }

    fn quiet_logger() -> Logger {
        let mut logger = Logger::new("test");
        logger.set_level(crate::logging::LogLevel::Fatal);
        logger
    }

    fn generator(client: RecordingClient) -> TrafficGenerator<RecordingClient, RecordingPacer> {
        TrafficGenerator::new(client, RecordingPacer::default(), "localhost:8099", quiet_logger())
    }

    #[tokio::test]
    async fn test_single_event_sequence() {
        let mut generator = generator(RecordingClient::default());
        let mut out = Vec::new();
        let summary = generator.run(1, &mut out).await.unwrap();

        let targets: Vec<String> = generator.client().seen().iter().map(|r| r.target()).collect();
        assert_eq!(targets, vec![
            "/gateway/m1/items/m1-0",
            "/gateway/m2/items/m2-0",
            "/gateway/m1/items/x%20y",
            "/gateway/m2/items/z%20t",
        ]);
        assert_eq!(summary.events, 1);
        assert_eq!(summary.requests_sent, 4);
        assert_eq!(generator.pacer().pauses.len(), 2);
    }

    #[tokio::test]
    async fn test_request_count_formula() {
        for count in [0u64, 1, 6, 7, 8, 14, 15, 22] {
            let mut generator = generator(RecordingClient::default());
            let summary = generator.run(count, &mut Vec::new()).await.unwrap();

            assert_eq!(summary.requests_sent, expected_request_count(count), "count {}", count);
            assert_eq!(generator.client().seen().len() as u64, expected_request_count(count));
            assert_eq!(generator.pacer().pauses.len() as u64, 2 * count);
        }
    }

    #[tokio::test]
    async fn test_zero_events_issue_nothing() {
        let mut generator = generator(RecordingClient::default());
        let mut out = Vec::new();
        let summary = generator.run(0, &mut out).await.unwrap();

        assert!(generator.client().seen().is_empty());
        assert!(out.is_empty());
        assert_eq!(summary, RunSummary { elapsed: summary.elapsed, ..RunSummary::default() });
    }

    #[tokio::test]
    async fn test_bodies_written_one_per_line() {
        let mut generator = generator(RecordingClient::default());
        let mut out = Vec::new();
        generator.run(2, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[4], "/gateway/m1/items/m1-1");
        assert_eq!(lines[5], "/gateway/m2/items/m2-1");
    }

    #[tokio::test]
    async fn test_pauses_stay_in_range() {
        let mut generator = generator(RecordingClient::default());
        let summary = generator.run(30, &mut Vec::new()).await.unwrap();

        let pauses = &generator.pacer().pauses;
        assert_eq!(pauses.len(), 60);
        assert!(pauses.iter().all(|p| *p >= Duration::from_millis(10) && *p <= Duration::from_millis(110)));
        assert_eq!(summary.total_pause, pauses.iter().sum::<Duration>());
    }

    #[tokio::test]
    async fn test_error_statuses_are_printed_and_counted() {
        let client = RecordingClient {
            status: Some(404),
            ..Default::default()
        };
        let mut generator = generator(client);
        let mut out = Vec::new();
        let summary = generator.run(1, &mut out).await.unwrap();

        assert_eq!(summary.requests_sent, 4);
        assert_eq!(summary.non_success_responses, 4);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 4);
    }

    #[tokio::test]
    async fn test_first_failure_aborts_run() {
        let client = RecordingClient {
            fail_on: Some(3),
            ..Default::default()
        };
        let mut generator = generator(client);
        let mut out = Vec::new();
        let result = generator.run(5, &mut out).await;

        assert!(matches!(result, Err(AppError::Network(_))));
        assert_eq!(generator.client().seen().len(), 3);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[tokio::test]
    async fn test_configured_gateway_is_used() {
        let mut generator = TrafficGenerator::new(
            RecordingClient::default(),
            RecordingPacer::default(),
            "localhost",
            quiet_logger(),
        );
        generator.run(3, &mut Vec::new()).await.unwrap();

        assert_eq!(generator.gateway(), "localhost");
        assert!(generator.client().seen().iter().all(|r| r.host == "localhost"));
    }
}
