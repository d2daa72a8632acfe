//! Assemble and print a comparison over two synthetic captures.
//!
//! Stands in for the real setup (a columnar loader feeding two capture
//! files into the pipeline) so the output of the comparison layer can
//! be inspected without emulation data at hand.
//!
//! ```text
//! cargo run --example compare -- --threshold 100kbps --stall-rate 10
//! ```

use clap::Parser;
use rand::Rng as _;
use satflow::{
    BitRate, Comparison, FlowId, Interval, OutageConfig, RawRecord, SeriesSummary, Timestamp,
};

#[derive(Parser)]
struct Args {
    /// Goodput threshold below which a sample counts as unavailable.
    #[arg(long, default_value = "100kbps")]
    threshold: BitRate,

    /// Nominal experiment duration.
    #[arg(long, default_value = "1000s")]
    duration: Interval,

    /// Percentage of samples during which the receiver counter stalls.
    #[arg(long, default_value_t = 5)]
    stall_rate: u32,

    /// Number of samples per capture (1 Hz).
    #[arg(long, default_value_t = 1_000)]
    samples: u64,
}

fn synthetic_capture(epoch_ms: u64, samples: u64, stall_rate: u32) -> Vec<RawRecord> {
    let mut rng = rand::thread_rng();
    let mut total = 0.0;

    (0..samples)
        .map(|i| {
            if !rng.gen_bool(stall_rate as f64 / 100.0) {
                total += rng.gen_range(50_000.0..150_000.0);
            }
            RawRecord::new(FlowId::ZERO, Timestamp::from_millis(epoch_ms + i * 1_000))
                .with_value("cwnd", rng.gen_range(10.0..500.0))
                .with_value("rtt_mean", rng.gen_range(500.0..700.0))
                .with_value("bytes_received", total)
                .with_value("bytes_sent", total * 1.02)
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let receiver_records = synthetic_capture(1_500, args.samples, args.stall_rate);
    let sender_records = synthetic_capture(0, args.samples, args.stall_rate);

    let outage = OutageConfig::new(args.threshold, Interval::from_secs(1), args.duration)?;

    let pair = Comparison::builder()
        .title("synthetic cubic run")
        .receiver(FlowId::ZERO, &["rtt_mean", "bytes_received"])
        .sender(FlowId::ZERO, &["cwnd", "bytes_sent"])
        .outage(outage)
        .build()?
        .assemble(&receiver_records, &sender_records)?;

    println!("{}", pair.title);
    println!(
        "receiver: {} samples from {}",
        pair.receiver.len(),
        pair.receiver.capture_epoch
    );
    println!(
        "sender:   {} samples from {}",
        pair.sender.len(),
        pair.sender.capture_epoch
    );

    for (label, series) in [("receiver", &pair.receiver), ("sender", &pair.sender)] {
        let summary = SeriesSummary::of(series);
        for column in &summary.columns {
            let (low, high) = column.display_range();
            println!(
                "{label}/{}: mean {:.1}, axis [{low:.1}, {high:.1}]",
                column.descriptor.name, column.mean
            );
        }
    }

    if let Some(outage) = pair.outage {
        println!(
            "outage: {} intervals, {}ms unavailable, availability {:.4}",
            outage.intervals_ms.len(),
            outage.total_unavailable_ms,
            outage.availability
        );
    }

    Ok(())
}
