// src/readers/timefinder.rs

//! The _Time Extractor_: scan a stream of log lines and pull out one
//! timestamp per line, in original line order, using a compiled
//! [`TimeFormat`].
//!
//! The scan fans out over `N` worker threads through per-worker bounded
//! [`crossbeam_channel`]s. A producer distributes lines round-robin, so
//! worker _i_ always receives lines _i, i+N, i+2N, …_; the collector reads
//! the worker output channels back in the same cyclic order. That one
//! deterministic cycle guarantees the output order exactly matches the
//! input line order for any `N`, without a global lock and without sorting.
//!
//! [`TimeFormat`]: crate::data::datetime::TimeFormat

use std::io::{BufRead, BufReader, Read};
use std::thread;

use ::crossbeam_channel::{bounded, Receiver, Sender};
use ::si_trace_print::{defn, defo, defx};

use crate::common::{EpochSecond, Result, SparklogError};
use crate::data::datetime::TimeFormat;

/// how many values a per-worker channel buffers before the sender blocks
/// (back-pressure against a fast producer or a slow collector)
const CHANNEL_CAPACITY: usize = 16;

/// what to do with a line that has no parseable timestamp
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParsePolicy {
    /// skip the line; it contributes nothing to the output sequence
    Lenient,
    /// abort the whole scan on the first such line
    Strict,
}

/// The per-line search result sent from a worker to the collector.
///
/// `Ok(None)` is a lenient-policy skip marker: it keeps the round-robin
/// lockstep intact for lines that matched nothing.
type LineSearchResult = Result<Option<EpochSecond>>;

type ChanSendLine = Sender<String>;
type ChanRecvLine = Receiver<String>;
type ChanSendSearch = Sender<LineSearchResult>;
type ChanRecvSearch = Receiver<LineSearchResult>;

/// Extracts timestamps from every line of a log stream.
pub struct TimeFinder {
    format: TimeFormat,
    parallelism: usize,
    policy: ParsePolicy,
}

impl TimeFinder {
    /// Compile `template` and ready a scan with `parallelism` worker
    /// threads. An invalid template is a fatal configuration error.
    pub fn new(template: &str, parallelism: usize, policy: ParsePolicy) -> Result<TimeFinder> {
        defn!("({:?}, {}, {:?})", template, parallelism, policy);
        let format = TimeFormat::new(template)?;
        defx!();

        Ok(TimeFinder {
            format,
            parallelism: parallelism.max(1),
            policy,
        })
    }

    /// the compiled format artifacts
    pub fn format(&self) -> &TimeFormat {
        &self.format
    }

    /// search one line for its first timestamp
    pub fn find_first_timestamp(&self, line: &str) -> Option<EpochSecond> {
        self.format.find_timestamp(line)
    }

    /// Scan every line of `reader` for a timestamp.
    ///
    /// Returns the timestamps of all matching lines, in original line
    /// order, for any parallelism degree. Under [`ParsePolicy::Strict`]
    /// the first line without a timestamp fails the whole scan with
    /// [`SparklogError::LineParse`]. I/O errors from `reader` also fail
    /// the scan.
    pub fn find_times<R: Read + Send>(&self, reader: R) -> Result<Vec<EpochSecond>> {
        let parallelism: usize = self.parallelism;
        defn!("parallelism {}", parallelism);

        let mut line_sends: Vec<ChanSendLine> = Vec::with_capacity(parallelism);
        let mut line_recvs: Vec<ChanRecvLine> = Vec::with_capacity(parallelism);
        let mut search_sends: Vec<ChanSendSearch> = Vec::with_capacity(parallelism);
        let mut search_recvs: Vec<ChanRecvSearch> = Vec::with_capacity(parallelism);
        for _ in 0..parallelism {
            let (send, recv) = bounded::<String>(CHANNEL_CAPACITY);
            line_sends.push(send);
            line_recvs.push(recv);
            let (send, recv) = bounded::<LineSearchResult>(CHANNEL_CAPACITY);
            search_sends.push(send);
            search_recvs.push(recv);
        }

        let mut times: Vec<EpochSecond> = Vec::new();
        let mut scan_err: Option<SparklogError> = None;

        thread::scope(|scope| {
            // the producer distributes lines round-robin across workers.
            // dropping `line_sends` at the end hangs up every worker.
            let producer = scope.spawn(move || -> Option<std::io::Error> {
                let mut worker: usize = 0;
                for line_result in BufReader::new(reader).lines() {
                    let line: String = match line_result {
                        Ok(line) => line,
                        Err(err) => return Some(err),
                    };
                    if line_sends[worker].send(line).is_err() {
                        // the collector aborted and hung up
                        break;
                    }
                    worker = (worker + 1) % parallelism;
                }

                None
            });

            // the workers search their share of lines, in hand-off order
            for (line_recv, search_send) in line_recvs.drain(..).zip(search_sends.drain(..)) {
                scope.spawn(move || {
                    for line in line_recv.iter() {
                        let result: LineSearchResult = match self.find_first_timestamp(&line) {
                            Some(time) => Ok(Some(time)),
                            None => match self.policy {
                                ParsePolicy::Lenient => Ok(None),
                                ParsePolicy::Strict => Err(SparklogError::LineParse { line }),
                            },
                        };
                        if search_send.send(result).is_err() {
                            break;
                        }
                    }
                });
            }

            // the collector (this thread) reads the worker outputs in the
            // same cyclic order the producer used; that preserves original
            // line order
            'collect: loop {
                let mut hungup: usize = 0;
                for search_recv in search_recvs.iter() {
                    match search_recv.recv() {
                        Ok(Ok(Some(time))) => times.push(time),
                        Ok(Ok(None)) => {}
                        Ok(Err(err)) => {
                            // strict-policy failure; round-robin lockstep
                            // makes this the first failed line by position
                            scan_err = Some(err);
                            break 'collect;
                        }
                        Err(_) => {
                            // this worker is done and hung up
                            hungup += 1;
                        }
                    }
                }
                if hungup == parallelism {
                    break;
                }
            }
            // hanging up on the workers unblocks any still-sending worker,
            // which in turn unblocks the producer
            drop(search_recvs);

            if let Ok(Some(err)) = producer.join() {
                defo!("producer I/O error {:?}", err);
                if scan_err.is_none() {
                    scan_err = Some(SparklogError::Io(err));
                }
            }
        });

        match scan_err {
            Some(err) => {
                defx!("scan failed");
                Err(err)
            }
            None => {
                defx!("found {} timestamps", times.len());
                Ok(times)
            }
        }
    }
}
