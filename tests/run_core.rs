
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use kurl::error::RunError;
use kurl::http::{Probe, RequestSpec};
use kurl::run::{Report, ResponseTest, Settings, run, run_many, run_many_test};
use reqwest::Url;

use support_core::{Behavior, closed_port_url, run_async_test, spawn_http_server};

fn spec_for(url: &str) -> Result<RequestSpec, String> {
    Url::parse(url)
        .map(RequestSpec::get)
        .map_err(|err| format!("bad url {}: {}", url, err))
}

fn check_shape(report: &Report, settings: &Settings) -> Result<(), String> {
    let total = settings.total_requests();
    if report.completed_count.saturating_add(report.error_count) != total {
        return Err(format!(
            "completed {} + errors {} != {}",
            report.completed_count, report.error_count, total
        ));
    }
    if report.latencies.len() != total || report.statuses.len() != total {
        return Err(format!(
            "Expected {} slots, got {} latencies and {} statuses",
            total,
            report.latencies.len(),
            report.statuses.len()
        ));
    }
    let histogram_total = report
        .status_codes_frequency
        .values()
        .fold(0usize, |acc, count| acc.saturating_add(*count));
    if histogram_total != report.completed_count {
        return Err(format!(
            "Histogram sums to {}, completed is {}",
            histogram_total, report.completed_count
        ));
    }
    Ok(())
}

#[test]
fn all_ok_run_counts_every_request() -> Result<(), String> {
    let server = spawn_http_server(Behavior::Ok)?;
    let settings = Settings::new(5, 10);
    let spec = spec_for(&server.url)?;

    run_async_test(async {
        let report = run(settings, &spec).await.map_err(|err| err.to_string())?;
        check_shape(&report, &settings)?;
        if report.completed_count != 50 || report.error_count != 0 {
            return Err(format!("Unexpected counts: {:?}", report));
        }
        if report.status_count(200) != 50 {
            return Err(format!(
                "Unexpected histogram: {:?}",
                report.status_codes_frequency
            ));
        }
        if report.overall_duration.is_zero() {
            return Err("Expected a non-zero duration".to_owned());
        }
        Ok(())
    })?;

    if server.hits() != 50 {
        return Err(format!("Server saw {} requests", server.hits()));
    }
    Ok(())
}

#[test]
fn non_2xx_statuses_count_as_completed() -> Result<(), String> {
    let server = spawn_http_server(Behavior::Alternate)?;
    let settings = Settings::new(10, 10);
    let spec = spec_for(&server.url)?;

    run_async_test(async {
        let report = run(settings, &spec).await.map_err(|err| err.to_string())?;
        check_shape(&report, &settings)?;
        if report.completed_count != 100 || report.error_count != 0 {
            return Err(format!("Unexpected counts: {:?}", report));
        }
        if report.status_count(200) != 50 || report.status_count(429) != 50 {
            return Err(format!(
                "Unexpected histogram: {:?}",
                report.status_codes_frequency
            ));
        }
        if report.status_ratio_x100(429) != 5_000 {
            return Err(format!(
                "Unexpected 429 share: {}",
                report.status_ratio_x100(429)
            ));
        }
        Ok(())
    })
}

#[test]
fn refused_connections_are_errors_with_latency() -> Result<(), String> {
    let url = closed_port_url()?;
    let settings = Settings::new(5, 10).with_timeout(Duration::from_secs(2));
    let spec = spec_for(&url)?;

    run_async_test(async {
        let report = run(settings, &spec).await.map_err(|err| err.to_string())?;
        check_shape(&report, &settings)?;
        if report.error_count != 50 || report.completed_count != 0 {
            return Err(format!("Unexpected counts: {:?}", report));
        }
        if !report.status_codes_frequency.is_empty() {
            return Err("Expected an empty histogram".to_owned());
        }
        if report.statuses.iter().any(Option::is_some) {
            return Err("Expected every slot to be a failure".to_owned());
        }
        Ok(())
    })
}

#[test]
fn descriptor_count_must_match_threads() -> Result<(), String> {
    let server = spawn_http_server(Behavior::Ok)?;
    let spec = spec_for(&server.url)?;
    let settings = Settings::new(7, 2);

    run_async_test(async {
        let requests = vec![Some(spec.clone()); 3];
        match run_many(settings, requests).await {
            Err(RunError::RequestCountMismatch {
                expected: 7,
                actual: 3,
            }) => Ok(()),
            Err(err) => Err(format!("Unexpected error: {}", err)),
            Ok(report) => Err(format!("Expected an error, got {:?}", report)),
        }
    })?;

    if server.hits() != 0 {
        return Err(format!("Server saw {} requests", server.hits()));
    }
    Ok(())
}

#[test]
fn missing_descriptor_is_rejected() -> Result<(), String> {
    let server = spawn_http_server(Behavior::Ok)?;
    let spec = spec_for(&server.url)?;
    let settings = Settings::new(3, 2);

    run_async_test(async {
        let requests = vec![Some(spec.clone()), None, Some(spec.clone())];
        match run_many(settings, requests).await {
            Err(RunError::MissingRequest { worker: 1 }) => Ok(()),
            Err(err) => Err(format!("Unexpected error: {}", err)),
            Ok(report) => Err(format!("Expected an error, got {:?}", report)),
        }
    })?;

    if server.hits() != 0 {
        return Err(format!("Server saw {} requests", server.hits()));
    }
    Ok(())
}

#[test]
fn test_count_must_match_threads() -> Result<(), String> {
    let spec = spec_for("http://127.0.0.1:9/")?;
    let settings = Settings::new(2, 1);

    run_async_test(async {
        let requests = vec![Some(spec.clone()); 2];
        match run_many_test(settings, requests, vec![None]).await {
            Err(RunError::TestCountMismatch {
                expected: 2,
                actual: 1,
            }) => Ok(()),
            Err(err) => Err(format!("Unexpected error: {}", err)),
            Ok(report) => Err(format!("Expected an error, got {:?}", report)),
        }
    })
}

#[test]
fn zero_requests_per_worker_is_rejected() -> Result<(), String> {
    let spec = spec_for("http://127.0.0.1:9/")?;
    run_async_test(async {
        match run(Settings::new(2, 0), &spec).await {
            Err(RunError::ZeroRequestCount) => Ok(()),
            Err(err) => Err(format!("Unexpected error: {}", err)),
            Ok(report) => Err(format!("Expected an error, got {:?}", report)),
        }
    })
}

#[test]
fn zero_threads_yield_an_empty_report() -> Result<(), String> {
    let spec = spec_for("http://127.0.0.1:9/")?;
    run_async_test(async {
        let report = run(Settings::new(0, 5), &spec)
            .await
            .map_err(|err| err.to_string())?;
        if report != Report::default() {
            return Err(format!("Expected an empty report, got {:?}", report));
        }
        Ok(())
    })
}

#[test]
fn failed_warm_up_aborts_before_any_request() -> Result<(), String> {
    let url = closed_port_url()?;
    let spec = spec_for(&url)?;
    let settings = Settings::new(3, 4)
        .with_warm(true)
        .with_timeout(Duration::from_secs(2));
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let test: ResponseTest = Arc::new(move |_probe: Probe<'_>, _latency: Duration| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    run_async_test(async {
        let requests = vec![Some(spec.clone()); 3];
        let tests = vec![Some(Arc::clone(&test)); 3];
        match run_many_test(settings, requests, tests).await {
            Err(RunError::WarmupFailed { .. }) => Ok(()),
            Err(err) => Err(format!("Unexpected error: {}", err)),
            Ok(report) => Err(format!("Expected an error, got {:?}", report)),
        }
    })?;

    if calls.load(Ordering::SeqCst) != 0 {
        return Err("No worker should have issued a request".to_owned());
    }
    Ok(())
}

#[test]
fn slow_warm_up_is_outside_the_measured_window() -> Result<(), String> {
    let delay = Duration::from_millis(300);
    let server = spawn_http_server(Behavior::Delay(delay))?;
    let spec = spec_for(&server.url)?;
    let settings = Settings::new(2, 1).with_warm(true);

    run_async_test(async {
        let report = run(settings, &spec).await.map_err(|err| err.to_string())?;
        check_shape(&report, &settings)?;
        if report.overall_duration < delay {
            return Err(format!("Duration too short: {:?}", report.overall_duration));
        }
        if report.overall_duration >= delay.saturating_mul(2) {
            return Err(format!(
                "Warm-up leaked into the duration: {:?}",
                report.overall_duration
            ));
        }
        Ok(())
    })?;

    if server.hits() != 3 {
        return Err(format!("Expected 3 hits with warm-up, got {}", server.hits()));
    }
    Ok(())
}

#[test]
fn wait_between_requests_spaces_arrivals() -> Result<(), String> {
    let wait = Duration::from_millis(150);
    let server = spawn_http_server(Behavior::Ok)?;
    let spec = spec_for(&server.url)?;
    let settings = Settings::new(1, 5).with_wait_between_requests(wait);

    run_async_test(async {
        let report = run(settings, &spec).await.map_err(|err| err.to_string())?;
        check_shape(&report, &settings)?;
        if report.overall_duration < wait.saturating_mul(4) {
            return Err(format!("Duration too short: {:?}", report.overall_duration));
        }
        Ok(())
    })?;

    let arrivals = server.arrivals();
    if arrivals.len() != 5 {
        return Err(format!("Expected 5 arrivals, got {}", arrivals.len()));
    }
    for pair in arrivals.windows(2) {
        if let [earlier, later] = pair {
            let gap = later.saturating_duration_since(*earlier);
            if gap < wait {
                return Err(format!("Gap {:?} shorter than {:?}", gap, wait));
            }
        }
    }
    Ok(())
}

#[test]
fn workers_run_in_parallel() -> Result<(), String> {
    let delay = Duration::from_millis(200);
    let server = spawn_http_server(Behavior::Delay(delay))?;
    let spec = spec_for(&server.url)?;
    let settings = Settings::new(4, 1);

    run_async_test(async {
        let report = run(settings, &spec).await.map_err(|err| err.to_string())?;
        check_shape(&report, &settings)?;
        if report.overall_duration < delay {
            return Err(format!("Duration too short: {:?}", report.overall_duration));
        }
        if report.overall_duration >= delay.saturating_mul(3) {
            return Err(format!(
                "Workers look serialized: {:?}",
                report.overall_duration
            ));
        }
        if report.latencies.iter().any(|latency| *latency < delay) {
            return Err(format!("Latency below server delay: {:?}", report.latencies));
        }
        Ok(())
    })
}

#[test]
fn response_test_sees_every_request() -> Result<(), String> {
    let server = spawn_http_server(Behavior::Ok)?;
    let spec = spec_for(&server.url)?;
    let settings = Settings::new(3, 4);
    let calls = Arc::new(AtomicUsize::new(0));
    let ok_bodies = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    let bodies = Arc::clone(&ok_bodies);
    let test: ResponseTest = Arc::new(move |probe: Probe<'_>, _latency: Duration| {
        counter.fetch_add(1, Ordering::SeqCst);
        if let Probe::Response(exchange) = probe
            && exchange.status.as_u16() == 200
            && exchange.body.as_ref() == b"OK"
        {
            bodies.fetch_add(1, Ordering::SeqCst);
        }
    });

    run_async_test(async {
        let requests = vec![Some(spec.clone()); 3];
        let tests = vec![Some(Arc::clone(&test)), None, Some(Arc::clone(&test))];
        let report = run_many_test(settings, requests, tests)
            .await
            .map_err(|err| err.to_string())?;
        check_shape(&report, &settings)
    })?;

    if calls.load(Ordering::SeqCst) != 8 {
        return Err(format!(
            "Expected 8 callback calls, got {}",
            calls.load(Ordering::SeqCst)
        ));
    }
    if ok_bodies.load(Ordering::SeqCst) != 8 {
        return Err(format!(
            "Expected 8 OK bodies, got {}",
            ok_bodies.load(Ordering::SeqCst)
        ));
    }
    Ok(())
}

#[test]
fn report_is_worker_major() -> Result<(), String> {
    let fast = spawn_http_server(Behavior::Ok)?;
    let slow = spawn_http_server(Behavior::Delay(Duration::from_millis(50)))?;
    let settings = Settings::new(2, 3);

    run_async_test(async {
        let requests = vec![Some(spec_for(&fast.url)?), Some(spec_for(&slow.url)?)];
        let report = run_many(settings, requests)
            .await
            .map_err(|err| err.to_string())?;
        check_shape(&report, &settings)?;
        let (first, second) = report.latencies.split_at(3);
        if second.iter().any(|latency| *latency < Duration::from_millis(50)) {
            return Err(format!("Slow worker slots out of order: {:?}", second));
        }
        if first.len() != 3 {
            return Err("Unexpected split".to_owned());
        }
        Ok(())
    })?;

    if fast.hits() != 3 || slow.hits() != 3 {
        return Err(format!("Unexpected hits: {} / {}", fast.hits(), slow.hits()));
    }
    Ok(())
}

#[test]
fn response_test_sees_status_or_failure() -> Result<(), String> {
    let url = closed_port_url()?;
    let server = spawn_http_server(Behavior::Alternate)?;
    let settings = Settings::new(2, 3).with_timeout(Duration::from_secs(2));
    let failures = Arc::new(AtomicUsize::new(0));
    let too_many = Arc::new(AtomicUsize::new(0));

    let failure_counter = Arc::clone(&failures);
    let status_counter = Arc::clone(&too_many);
    let test: ResponseTest = Arc::new(move |probe: Probe<'_>, _latency: Duration| {
        if probe.is_failure() && probe.status().is_none() {
            failure_counter.fetch_add(1, Ordering::SeqCst);
        }
        if probe.status().map(|status| status.as_u16()) == Some(429) {
            status_counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    run_async_test(async {
        let requests = vec![Some(spec_for(&url)?), Some(spec_for(&server.url)?)];
        let tests = vec![Some(Arc::clone(&test)); 2];
        let report = run_many_test(settings, requests, tests)
            .await
            .map_err(|err| err.to_string())?;
        check_shape(&report, &settings)?;
        if report.error_count != 3 {
            return Err(format!("Unexpected error count: {:?}", report));
        }
        Ok(())
    })?;

    if failures.load(Ordering::SeqCst) != 3 {
        return Err(format!(
            "Expected 3 failures seen by the test, got {}",
            failures.load(Ordering::SeqCst)
        ));
    }
    if too_many.load(Ordering::SeqCst) != 1 {
        return Err(format!(
            "Expected 1 429 seen by the test, got {}",
            too_many.load(Ordering::SeqCst)
        ));
    }
    Ok(())
}

#[test]
fn wait_is_measured_after_the_response_test() -> Result<(), String> {
    let wait = Duration::from_millis(150);
    let hook_time = Duration::from_millis(100);
    let server = spawn_http_server(Behavior::Ok)?;
    let spec = spec_for(&server.url)?;
    let settings = Settings::new(1, 3).with_wait_between_requests(wait);
    let test: ResponseTest = Arc::new(move |_probe: Probe<'_>, _latency: Duration| {
        std::thread::sleep(hook_time);
    });

    run_async_test(async {
        let report = run_many_test(settings, vec![Some(spec.clone())], vec![Some(test)])
            .await
            .map_err(|err| err.to_string())?;
        check_shape(&report, &settings)
    })?;

    let arrivals = server.arrivals();
    if arrivals.len() != 3 {
        return Err(format!("Expected 3 arrivals, got {}", arrivals.len()));
    }
    let minimum_gap = wait.saturating_add(hook_time);
    for pair in arrivals.windows(2) {
        if let [earlier, later] = pair {
            let gap = later.saturating_duration_since(*earlier);
            if gap < minimum_gap {
                return Err(format!("Gap {:?} shorter than {:?}", gap, minimum_gap));
            }
        }
    }
    Ok(())
}
