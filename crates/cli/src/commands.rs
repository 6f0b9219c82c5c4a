use std::time::Duration;

use anyhow::{Context, bail};
use sizewatch_api::ApiClient;
use sizewatch_dashboard::{ChartModel, Dashboard, DetailsView};
use sizewatch_loader::{DetailLoader, LoadSnapshot, LoaderConfig, RunPhase, WatchSink};
use sizewatch_primitives::{PushKey, SizeKind};
use tracing::info;

use crate::cli::Command;
use crate::config::Config;

pub async fn run(command: Command, config: &Config) -> anyhow::Result<()> {
	let client = ApiClient::new(config.base_url.clone())?.with_timeout(config.request_timeout())?;
	match command {
		Command::Push { sha, prev_sha, size } => push(client, config, PushKey::from_parts(sha, prev_sha), size).await,
		Command::Chunks => chunks(&client).await,
		Command::Chart { chunks, size } => chart(&client, chunks, size).await,
		Command::Sweep { chunk, size, interval_ms } => sweep(client, config, chunk, size, Duration::from_millis(interval_ms)).await,
	}
}

async fn push(client: ApiClient, config: &Config, key: PushKey, size: SizeKind) -> anyhow::Result<()> {
	let (sink, state) = WatchSink::channel();
	let mut loader = DetailLoader::new(client, sink, LoaderConfig::default());

	let run = loader.submit(key.clone()).context("detail loader is closed")?;
	let phase = run.finished().await;
	let snapshot = state.borrow().clone();
	print_details(config, size, &key, &snapshot);
	finish(&key, phase, &snapshot)
}

async fn chunks(client: &ApiClient) -> anyhow::Result<()> {
	for chunk in client.chunks().await? {
		println!("{chunk}");
	}
	Ok(())
}

async fn chart(client: &ApiClient, chunks: Vec<String>, size: SizeKind) -> anyhow::Result<()> {
	let mut model = ChartModel::new();
	model.set_chunks(chunks);
	model.set_size(size);
	let series = client.charts(model.selected_chunks()).await?;
	model.set_series(series);

	for line in chart_table(&model) {
		println!("{line}");
	}
	Ok(())
}

async fn sweep(client: ApiClient, config: &Config, chunk: String, size: SizeKind, interval: Duration) -> anyhow::Result<()> {
	let series = client.chart(&chunk).await?;
	let (sink, state) = WatchSink::channel();
	let mut dashboard = Dashboard::new(client, sink, config.loader());
	dashboard.chart_mut().set_chunks(vec![chunk.clone()]);
	dashboard.chart_mut().set_size(size);
	dashboard.chart_mut().set_series(vec![series]);

	let count = dashboard.chart().push_count();
	if count == 0 {
		bail!("chunk {chunk} has no recorded pushes");
	}

	let mut last = None;
	for index in 0..count {
		if let Some(run) = dashboard.hover(index) {
			last = Some(run);
		}
		tokio::time::sleep(interval).await;
	}
	info!(hovers = count, interval_ms = interval.as_millis() as u64, "sweep.done");

	let run = last.context("no push was hovered")?;
	let phase = run.finished().await;
	let key = dashboard.details().current_key().cloned().context("no push selected")?;
	let snapshot = state.borrow().clone();
	print_details(config, size, &key, &snapshot);
	finish(&key, phase, &snapshot)
}

fn print_details(config: &Config, size: SizeKind, key: &PushKey, snapshot: &LoadSnapshot) {
	let view = DetailsView::new(config.repository.as_deref(), size);
	for line in view.render(key, snapshot) {
		println!("{line}");
	}
}

fn finish(key: &PushKey, phase: RunPhase, snapshot: &LoadSnapshot) -> anyhow::Result<()> {
	match (phase, &snapshot.error) {
		(RunPhase::Failed, Some(error)) if error.source.is_transient() => {
			Err(error.clone()).with_context(|| format!("failed to load {key}, the dashboard may be unreachable; run again to retry"))
		}
		(RunPhase::Failed, Some(error)) => Err(error.clone()).with_context(|| format!("failed to load {key}")),
		(RunPhase::Failed, None) => bail!("failed to load {key}"),
		_ => Ok(()),
	}
}

/// One line per push: index, short sha, then each chunk's size.
fn chart_table(model: &ChartModel) -> Vec<String> {
	let rows = model.chart_rows();
	let Some(first) = model.series().first() else {
		return Vec::new();
	};

	let mut header = format!("{:>4}  {:<10}", "#", "sha");
	for row in &rows {
		header.push_str(&format!(" {:>12}", row.chunk));
	}

	let mut lines = vec![header];
	for (index, point) in first.points.iter().enumerate() {
		let sha: String = point.sha.chars().take(10).collect();
		let mut line = format!("{index:>4}  {sha:<10}");
		for row in &rows {
			match row.values.get(index) {
				Some(value) => line.push_str(&format!(" {value:>12}")),
				None => line.push_str(&format!(" {:>12}", "-")),
			}
		}
		lines.push(line);
	}
	lines
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use sizewatch_loader::{LoadError, LoadStage};
	use sizewatch_primitives::{ChartPoint, ChunkSeries, FetchError};

	use super::*;

	fn point(sha: &str, gzip: u64) -> ChartPoint {
		ChartPoint {
			sha: sha.to_string(),
			created_at: String::new(),
			stat_size: 0,
			parsed_size: 0,
			gzip_size: gzip,
		}
	}

	#[test]
	fn chart_table_aligns_series() {
		let mut model = ChartModel::new();
		model.set_series(vec![
			ChunkSeries {
				chunk: "build".to_string(),
				points: vec![point("0123456789abcdef", 100), point("fedcba", 120)],
			},
			ChunkSeries {
				chunk: "vendor".to_string(),
				points: vec![point("0123456789abcdef", 7)],
			},
		]);

		assert_eq!(
			chart_table(&model),
			[
				"   #  sha               build       vendor",
				"   0  0123456789          100            7",
				"   1  fedcba              120            -",
			]
		);
	}

	#[test]
	fn failed_runs_become_errors() {
		let key = PushKey::new("abc");
		let failed = LoadSnapshot {
			error: Some(LoadError::new(LoadStage::Push, FetchError::NotFound("abc".to_string()))),
			..LoadSnapshot::default()
		};
		let err = finish(&key, RunPhase::Failed, &failed).unwrap_err();
		assert_eq!(err.to_string(), "failed to load abc");
		assert!(finish(&key, RunPhase::Done, &LoadSnapshot::default()).is_ok());
	}

	#[test]
	fn unavailable_source_suggests_retry() {
		let key = PushKey::with_prev("abc", "def");
		let failed = LoadSnapshot {
			error: Some(LoadError::new(LoadStage::Delta, FetchError::Unavailable("connection refused".to_string()))),
			..LoadSnapshot::default()
		};
		let err = finish(&key, RunPhase::Failed, &failed).unwrap_err();
		assert_eq!(
			err.to_string(),
			"failed to load def..abc, the dashboard may be unreachable; run again to retry"
		);
		assert_eq!(err.root_cause().to_string(), "unavailable: connection refused");
	}
}
