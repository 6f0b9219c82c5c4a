use std::future::Future;
use std::sync::OnceLock;

use tokio::task::JoinHandle;

fn runtime_handle() -> tokio::runtime::Handle {
	if let Ok(handle) = tokio::runtime::Handle::try_current() {
		return handle;
	}

	static FALLBACK_RT: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
	let runtime = FALLBACK_RT.get_or_init(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.worker_threads(1)
			.thread_name("sizewatch-worker")
			.build()
			.expect("failed to build sizewatch-worker fallback tokio runtime")
	});
	runtime.handle().clone()
}

/// Spawns an async task on the current runtime, tagged with `task` for tracing.
#[allow(clippy::disallowed_methods)]
pub fn spawn<F>(task: &'static str, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(task, "worker.spawn");
	runtime_handle().spawn(fut)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test(flavor = "current_thread")]
	async fn spawn_runs_on_current_runtime() {
		let handle = spawn("test.current", async { 7 });
		assert_eq!(handle.await.ok(), Some(7));
	}

	#[test]
	fn spawn_falls_back_outside_runtime() {
		let handle = spawn("test.fallback", async { "done" });
		let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
		assert_eq!(rt.block_on(handle).ok(), Some("done"));
	}
}
