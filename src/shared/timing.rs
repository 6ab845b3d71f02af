//! Timing utilities for HTTP request measurements.

use crate::http::types::TimingInfo;
use std::time::Instant;

/// Start and end of one request phase.
#[derive(Debug, Default, Clone, Copy)]
pub struct Span {
    pub start: Option<Instant>,
    pub end: Option<Instant>,
}

impl Span {
    fn begin(&mut self) {
        self.start = Some(Instant::now());
    }

    fn finish(&mut self) {
        self.end = Some(Instant::now());
    }

    pub fn millis(&self) -> Option<u64> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some(e.duration_since(s).as_millis() as u64),
            _ => None,
        }
    }
}

/// Detailed timing measurements for the phases of one request:
/// DNS, TCP connect, TLS handshake, time to first byte, download.
#[derive(Debug)]
pub struct DetailedTiming {
    pub dns: Span,
    pub tcp: Span,
    pub tls: Span,
    pub ttfb: Span,
    pub download: Span,
    pub total_start: Instant,
}

impl DetailedTiming {
    pub fn new() -> Self {
        Self {
            dns: Span::default(),
            tcp: Span::default(),
            tls: Span::default(),
            ttfb: Span::default(),
            download: Span::default(),
            total_start: Instant::now(),
        }
    }

    pub fn to_timing_info(&self) -> TimingInfo {
        let total = self
            .download
            .end
            .unwrap_or_else(Instant::now)
            .duration_since(self.total_start)
            .as_millis() as u64;

        TimingInfo {
            total,
            dns: self.dns.millis(),
            tcp: self.tcp.millis(),
            tls: self.tls.millis(),
            ttfb: self.ttfb.millis(),
            download: self.download.millis(),
        }
    }

    pub fn start_dns(&mut self) {
        self.dns.begin();
    }

    pub fn end_dns(&mut self) {
        self.dns.finish();
    }

    pub fn start_tcp(&mut self) {
        self.tcp.begin();
    }

    pub fn end_tcp(&mut self) {
        self.tcp.finish();
    }

    pub fn start_tls(&mut self) {
        self.tls.begin();
    }

    pub fn end_tls(&mut self) {
        self.tls.finish();
    }

    /// Marks the moment the request head is handed to the connection.
    pub fn start_request(&mut self) {
        self.ttfb.begin();
    }

    /// Marks the arrival of the response head.
    pub fn mark_ttfb(&mut self) {
        self.ttfb.finish();
    }

    pub fn start_download(&mut self) {
        self.download.begin();
    }

    pub fn end_download(&mut self) {
        self.download.finish();
    }
}

impl Default for DetailedTiming {
    fn default() -> Self {
        Self::new()
    }
}
