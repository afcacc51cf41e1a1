use super::*;

fn run_to_end(driver: &mut AnimationDriver) -> Vec<Advance> {
    let mut out = Vec::new();
    loop {
        let adv = driver.advance();
        let done = adv.is_done();
        out.push(adv);
        if done {
            return out;
        }
    }
}

#[test]
fn phase_for_frame_boundaries() {
    assert_eq!(phase_for_frame(FrameIndex(0), 3, 2), Phase::Stem);
    assert_eq!(phase_for_frame(FrameIndex(2), 3, 2), Phase::Stem);
    assert_eq!(phase_for_frame(FrameIndex(3), 3, 2), Phase::Flower);
    assert_eq!(phase_for_frame(FrameIndex(4), 3, 2), Phase::Flower);
    assert_eq!(phase_for_frame(FrameIndex(5), 3, 2), Phase::Done);
    assert_eq!(phase_for_frame(FrameIndex(0), 0, 0), Phase::Done);
}

#[test]
fn stem_to_flower_transition_happens_once_at_stem_count() {
    let (s, f) = (7usize, 5usize);
    let mut driver = AnimationDriver::new(s, f);
    let advances = run_to_end(&mut driver);
    assert_eq!(advances.len(), s + f + 1);

    let phases: Vec<Phase> = advances
        .iter()
        .map(|a| match a {
            Advance::Draw(cmd) => cmd.phase(),
            Advance::Done => Phase::Done,
        })
        .collect();
    let transitions: Vec<usize> = phases
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] == Phase::Stem && w[1] == Phase::Flower)
        .map(|(i, _)| i + 1)
        .collect();
    assert_eq!(transitions, vec![s]);
    assert!(phases[..s + f].iter().all(|p| *p != Phase::Done));
    assert_eq!(phases[s + f], Phase::Done);
}

#[test]
fn done_is_idempotent_and_counter_saturates() {
    let mut driver = AnimationDriver::new(2, 2);
    run_to_end(&mut driver);
    assert_eq!(driver.frame(), FrameIndex(4));
    for _ in 0..3 {
        assert_eq!(driver.advance(), Advance::Done);
        assert_eq!(driver.frame(), FrameIndex(4));
    }
    assert!(driver.is_done());
}

#[test]
fn counter_increases_by_one_per_draw() {
    let mut driver = AnimationDriver::new(4, 6);
    for expected in 0..10u64 {
        assert_eq!(driver.frame(), FrameIndex(expected));
        assert!(!driver.advance().is_done());
    }
    assert_eq!(driver.frame(), FrameIndex(10));
}

#[test]
fn stem_prefix_has_call_index_points() {
    let mut driver = AnimationDriver::new(5, 3);
    for i in 0..5 {
        let Advance::Draw(DrawCommand::SetStem { points }) = driver.advance() else {
            panic!("expected stem command at call {i}");
        };
        assert_eq!(points.len(), i);
        for p in &points {
            assert!((p.y - (1.0 - p.x.exp())).abs() < 1e-12);
        }
    }
}

#[test]
fn flower_contour_has_j_points_at_call_s_plus_j() {
    let (s, f) = (3usize, 8usize);
    let mut driver = AnimationDriver::new(s, f);
    for _ in 0..s {
        driver.advance();
    }
    let tables = driver.tables().clone();
    for j in 0..f {
        let Advance::Draw(DrawCommand::ReplaceFlower { contour }) = driver.advance() else {
            panic!("expected flower command at call {}", s + j);
        };
        assert_eq!(contour.len(), j);
        for (idx, p) in contour.iter().enumerate() {
            let t = tables.flower_t()[idx];
            let r = 1.0 + 0.3 * (6.0 * t).cos();
            assert!((p.x - r * t.cos()).abs() < 1e-12);
            assert!((p.y - r * t.sin()).abs() < 1e-12);
        }
    }
    assert_eq!(driver.advance(), Advance::Done);
}

#[test]
fn zero_stem_samples_starts_in_flower() {
    let mut driver = AnimationDriver::new(0, 2);
    assert_eq!(driver.phase(), Phase::Flower);
    assert_eq!(
        driver.advance(),
        Advance::Draw(DrawCommand::ReplaceFlower { contour: vec![] })
    );
}

#[test]
fn zero_flower_samples_finishes_after_stem() {
    let mut driver = AnimationDriver::new(2, 0);
    assert!(!driver.advance().is_done());
    assert!(!driver.advance().is_done());
    assert_eq!(driver.advance(), Advance::Done);
}

#[test]
fn both_zero_is_done_immediately() {
    let mut driver = AnimationDriver::new(0, 0);
    assert_eq!(driver.total_frames(), 0);
    assert_eq!(driver.advance(), Advance::Done);
}

#[test]
fn default_run_milestones() {
    let mut driver = AnimationDriver::new(500, 1000);
    assert_eq!(driver.total_frames(), 1500);

    driver.advance();
    let Advance::Draw(cmd) = driver.advance() else {
        panic!("call 1 must draw");
    };
    assert_eq!(cmd, DrawCommand::SetStem {
        points: vec![Point::new(0.0, 0.0)]
    });

    for _ in 2..500 {
        driver.advance();
    }
    assert_eq!(
        driver.advance(),
        Advance::Draw(DrawCommand::ReplaceFlower { contour: vec![] })
    );
    for _ in 501..1500 {
        assert!(!driver.advance().is_done());
    }
    assert_eq!(driver.advance(), Advance::Done);
}

#[test]
fn try_new_rejects_oversized_tables() {
    assert!(AnimationDriver::try_new(MAX_PHASE_SAMPLES + 1, 1).is_err());
    assert!(AnimationDriver::try_new(10, 10).is_ok());
}

#[test]
fn draw_command_serializes_with_kind_tag() {
    let cmd = DrawCommand::SetStem {
        points: vec![Point::new(0.0, 0.0)],
    };
    let json = serde_json::to_value(&cmd).unwrap();
    assert_eq!(json["kind"], "set_stem");
    assert_eq!(json["points"].as_array().unwrap().len(), 1);
}
