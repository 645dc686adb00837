use crate::errors::{InvalidConfig, Result};
use crate::storage::disk::disk_scheduler::{DiskSchedulingConfig, DiskSchedulingEngine, DiskStep};
use crate::storage::disk::request::RequestStatus;
use crate::storage::disk::schedule::{Direction, SchedulingPolicy};
use crate::{default_logger, RequestId, TrackPosition};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn engine(head: TrackPosition, requests: &[TrackPosition]) -> Result<DiskSchedulingEngine> {
    let config = DiskSchedulingConfig {
        initial_head_position: head,
        requests: requests.to_vec(),
    };
    DiskSchedulingEngine::new(config, &default_logger())
}

// Ticks until complete and returns the ids reached on each tick.
fn drain(engine: &mut DiskSchedulingEngine, policy: SchedulingPolicy) -> Vec<Vec<RequestId>> {
    let mut order = vec![];
    while !engine.is_complete() {
        if let DiskStep::Moved { reached, .. } = engine.tick(policy).step {
            order.push(reached);
        }
    }
    order
}

#[test]
fn test_rejects_invalid_config() {
    let cases = vec![
        (50, vec![], InvalidConfig::EmptyRequestSet),
        (101, vec![10], InvalidConfig::HeadOutOfRange(101)),
        (
            50,
            vec![10, 20, 250],
            InvalidConfig::RequestOutOfRange {
                index: 2,
                position: 250,
            },
        ),
    ];

    for (head, requests, expected) in cases {
        let err = engine(head, &requests).err().unwrap();
        assert_eq!(err.downcast_ref::<InvalidConfig>(), Some(&expected));
    }
}

#[test]
fn test_fcfs_default_session() -> Result<()> {
    let mut engine = DiskSchedulingEngine::new(DiskSchedulingConfig::default(), &default_logger())?;

    let tick = engine.tick(SchedulingPolicy::Fcfs);
    assert_eq!(
        tick.step,
        DiskStep::Moved {
            from: 50,
            to: 90,
            reached: vec![0],
        }
    );
    assert_eq!(
        tick.snapshot.requests()[0].get_status(),
        RequestStatus::Serviced
    );
    assert_eq!(tick.snapshot.serviced_count(), 1);

    let order = drain(&mut engine, SchedulingPolicy::Fcfs);
    assert_eq!(order, vec![vec![1], vec![2], vec![3], vec![4], vec![5]]);
    assert_eq!(engine.state().head_position(), 85);
    assert_eq!(engine.state().total_seek_distance(), 255);
    assert_eq!(engine.state().serviced_count(), 6);

    Ok(())
}

#[test]
fn test_fcfs_order_is_insertion_order() -> Result<()> {
    let mut engine = engine(0, &[100, 1, 99, 2, 2])?;
    let order = drain(&mut engine, SchedulingPolicy::Fcfs);
    assert_eq!(order, vec![vec![0], vec![1], vec![2], vec![3], vec![4]]);
    Ok(())
}

#[test]
fn test_sstf_default_session() -> Result<()> {
    let mut engine = DiskSchedulingEngine::new(DiskSchedulingConfig::default(), &default_logger())?;

    let order = drain(&mut engine, SchedulingPolicy::Sstf);
    assert_eq!(order, vec![vec![4], vec![1], vec![3], vec![2], vec![5], vec![0]]);
    assert_eq!(engine.state().total_seek_distance(), 100);
    Ok(())
}

#[test]
fn test_sstf_equidistant_requests_in_insertion_order() -> Result<()> {
    let mut engine = engine(50, &[60, 40])?;
    let order = drain(&mut engine, SchedulingPolicy::Sstf);
    assert_eq!(order, vec![vec![0], vec![1]]);
    Ok(())
}

#[test]
fn test_scan_default_session() -> Result<()> {
    let mut engine = DiskSchedulingEngine::new(DiskSchedulingConfig::default(), &default_logger())?;
    let mut flips = 0;
    let mut direction = engine.state().direction();
    let mut ticks = 0;
    let mut order = vec![];

    while !engine.is_complete() {
        let tick = engine.tick(SchedulingPolicy::Scan);
        ticks += 1;
        if tick.snapshot.direction() != direction {
            flips += 1;
            direction = tick.snapshot.direction();
            assert_eq!(tick.snapshot.head_position(), 95);
        }
        if let DiskStep::Moved { reached, .. } = tick.step {
            order.extend(reached);
        }
        assert!(ticks <= 100, "SCAN did not settle");
    }

    assert_eq!(ticks, 25);
    assert_eq!(flips, 1);
    assert_eq!(direction, Direction::Down);
    assert_eq!(order, vec![2, 5, 0, 4, 1, 3]);
    assert_eq!(engine.state().head_position(), 20);

    Ok(())
}

#[test]
fn test_scan_reflects_once_per_boundary() -> Result<()> {
    let mut engine = engine(10, &[0, 45])?;
    let mut positions = vec![];
    let mut flips = vec![];
    let mut direction = engine.state().direction();

    while !engine.is_complete() {
        let tick = engine.tick(SchedulingPolicy::Scan);
        positions.push(tick.snapshot.head_position());
        if tick.snapshot.direction() != direction {
            direction = tick.snapshot.direction();
            flips.push((positions.len(), direction));
        }
    }

    // the upper end is passed on tick 18, the lower end on tick 37
    assert_eq!(flips, vec![(18, Direction::Down), (37, Direction::Up)]);
    assert_eq!(positions.len(), 37);
    assert_eq!(positions[16..18].to_vec(), vec![95, 95]);
    assert_eq!(positions[35..].to_vec(), vec![5, 5]);
    assert!(positions.iter().all(|&p| (5..=95).contains(&p)));

    Ok(())
}

#[test]
fn test_status_is_monotonic() -> Result<()> {
    let mut rng: StdRng = SeedableRng::seed_from_u64(7);
    let policies = [
        SchedulingPolicy::Fcfs,
        SchedulingPolicy::Sstf,
        SchedulingPolicy::Scan,
    ];

    for _ in 0..30 {
        let count = rng.gen_range(1..=8);
        let positions: Vec<TrackPosition> = (0..count).map(|_| rng.gen_range(0..=20) * 5).collect();
        let mut engine = engine(rng.gen_range(0..=100), &positions)?;
        let mut previous: Vec<RequestStatus> = engine
            .state()
            .requests()
            .iter()
            .map(|r| r.get_status())
            .collect();

        for _ in 0..200 {
            let policy = policies[rng.gen_range(0..policies.len())];
            let tick = engine.tick(policy);
            for (before, request) in previous.iter().zip(tick.snapshot.requests()) {
                let after = request.get_status();
                assert!(
                    *before == RequestStatus::Pending || after == RequestStatus::Serviced,
                    "{:?} -> {:?}",
                    before,
                    after
                );
            }
            previous = tick.snapshot.requests().iter().map(|r| r.get_status()).collect();
        }
        assert!(engine.is_complete());
        assert!(previous.iter().all(|s| *s == RequestStatus::Serviced));
    }

    Ok(())
}

#[test]
fn test_completion_leaves_everything_serviced() -> Result<()> {
    let policies = [
        SchedulingPolicy::Fcfs,
        SchedulingPolicy::Sstf,
        SchedulingPolicy::Scan,
    ];

    for policy in policies.iter().copied() {
        let mut engine =
            DiskSchedulingEngine::new(DiskSchedulingConfig::default(), &default_logger())?;
        let mut last = None;
        while !engine.is_complete() {
            last = Some(engine.tick(policy).snapshot);
        }

        // Scenario: the snapshot of the completing tick is already the end state.
        let last = last.unwrap();
        assert!(last
            .requests()
            .iter()
            .all(|r| r.get_status() == RequestStatus::Serviced));
        assert_eq!(last.serviced_count(), 6);
        assert_eq!(last.pending_count(), 0);

        // Scenario: ticking an exhausted engine changes nothing.
        for _ in 0..3 {
            let tick = engine.tick(policy);
            assert_eq!(tick.step, DiskStep::Exhausted);
            assert_eq!(tick.snapshot, last);
            assert_eq!(engine.state(), &last);
        }
    }

    let mut engine = engine(40, &[40])?;
    let tick = engine.tick(SchedulingPolicy::Sstf);
    assert_eq!(tick.snapshot.requests()[0].get_status(), RequestStatus::Serviced);
    assert!(engine.is_complete());

    Ok(())
}

#[test]
fn test_fcfs_and_sstf_terminate_within_request_count() -> Result<()> {
    for policy in [SchedulingPolicy::Fcfs, SchedulingPolicy::Sstf].iter().copied() {
        let mut engine = engine(37, &[3, 97, 37, 37, 64])?;
        let mut ticks = 0;
        while !engine.is_complete() {
            engine.tick(policy);
            ticks += 1;
        }
        assert_eq!(ticks, 5);

        let tick = engine.tick(policy);
        assert_eq!(tick.step, DiskStep::Exhausted);
        assert_eq!(tick.snapshot.serviced_count(), 5);
    }
    Ok(())
}

#[test]
fn test_reset_restores_creation_state() -> Result<()> {
    let logger = default_logger();
    let pristine = DiskSchedulingEngine::new(DiskSchedulingConfig::default(), &logger)?;
    let mut engine = DiskSchedulingEngine::new(DiskSchedulingConfig::default(), &logger)?;

    for _ in 0..12 {
        engine.tick(SchedulingPolicy::Scan);
    }
    assert_ne!(engine.state(), pristine.state());

    engine.reset();
    assert_eq!(engine.state(), pristine.state());
    assert_eq!(engine.state().direction(), Direction::Up);

    Ok(())
}
