//! Prometheus metrics

use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub cycles_total: IntCounter,
    pub cycle_failures_total: IntCounterVec,
    pub notifications_total: IntCounter,
    pub last_rsi: Gauge,
    pub cycle_duration_seconds: Histogram,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let cycles_total = IntCounter::new("rsi_cycles_total", "Evaluation cycles started")?;
        let cycle_failures_total = IntCounterVec::new(
            Opts::new("rsi_cycle_failures_total", "Evaluation cycles that failed"),
            &["reason"],
        )?;
        let notifications_total =
            IntCounter::new("rsi_notifications_total", "Alerts delivered to the channel")?;
        let last_rsi = Gauge::new("rsi_last_value", "Most recently computed RSI")?;
        let cycle_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "rsi_cycle_duration_seconds",
            "Wall time of one evaluation cycle",
        ))?;
        let http_requests_total =
            IntCounter::new("http_requests_total", "HTTP requests served")?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests being served")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;

        registry.register(Box::new(cycles_total.clone()))?;
        registry.register(Box::new(cycle_failures_total.clone()))?;
        registry.register(Box::new(notifications_total.clone()))?;
        registry.register(Box::new(last_rsi.clone()))?;
        registry.register(Box::new(cycle_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            cycles_total,
            cycle_failures_total,
            notifications_total,
            last_rsi,
            cycle_duration_seconds,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
        })
    }

    /// Render all metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
