use super::*;
use crate::foundation::error::BloomError;

fn schedule(delay_ms: u64, interval_ms: u64) -> TimerSchedule {
    TimerSchedule {
        start_delay: Duration::from_millis(delay_ms),
        interval: Duration::from_millis(interval_ms),
    }
}

fn stop_after(n: u64) -> impl FnMut() -> BloomResult<TickControl> {
    let mut seen = 0u64;
    move || {
        seen += 1;
        Ok(if seen >= n {
            TickControl::Stop
        } else {
            TickControl::Continue
        })
    }
}

#[test]
fn unpaced_runs_until_stop() {
    let mut tick = stop_after(7);
    let ticks = UnpacedTimer.run(schedule(1000, 1000), &mut tick).unwrap();
    assert_eq!(ticks, 7);
}

#[test]
fn paced_honours_delay_and_interval() {
    let start = Instant::now();
    let mut tick = stop_after(4);
    let ticks = PacedTimer.run(schedule(20, 10), &mut tick).unwrap();
    assert_eq!(ticks, 4);
    // 20ms delay + 3 intervals between 4 ticks.
    assert!(start.elapsed() >= Duration::from_millis(50));
}

#[test]
fn deadline_advances_by_interval_when_on_time() {
    let base = Instant::now();
    let interval = Duration::from_millis(5);
    let now = base + Duration::from_millis(2);
    assert_eq!(next_deadline(base, interval, now), base + interval);
}

#[test]
fn deadline_restarts_from_now_when_late() {
    let base = Instant::now();
    let interval = Duration::from_millis(5);
    let late = base + Duration::from_millis(17);
    assert_eq!(next_deadline(base, interval, late), late);
    // Exactly on the boundary counts as due now.
    let edge = base + interval;
    assert_eq!(next_deadline(base, interval, edge), edge);
}

#[test]
fn paced_late_ticks_run_in_order_without_burst() {
    let interval = Duration::from_millis(20);
    let mut starts: Vec<Instant> = Vec::new();
    let mut tick = || -> BloomResult<TickControl> {
        starts.push(Instant::now());
        if starts.len() <= 3 {
            std::thread::sleep(Duration::from_millis(50));
        }
        Ok(if starts.len() >= 8 {
            TickControl::Stop
        } else {
            TickControl::Continue
        })
    };
    let ticks = PacedTimer
        .run(
            TimerSchedule {
                start_delay: Duration::ZERO,
                interval,
            },
            &mut tick,
        )
        .unwrap();

    assert_eq!(ticks, 8);
    assert_eq!(starts.len(), 8);
    assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    // Ticks after the slow ones stay on the interval instead of catching up.
    for w in starts[3..].windows(2) {
        assert!(w[1] - w[0] >= Duration::from_millis(10), "burst: {:?}", w[1] - w[0]);
    }
}

#[test]
fn tick_error_stops_timer() {
    let mut calls = 0u32;
    let mut tick = || {
        calls += 1;
        if calls == 3 {
            return Err(BloomError::render("canvas lost"));
        }
        Ok(TickControl::Continue)
    };
    let err = UnpacedTimer.run(schedule(0, 0), &mut tick).unwrap_err();
    assert!(err.to_string().contains("canvas lost"));
    assert_eq!(calls, 3);
}
