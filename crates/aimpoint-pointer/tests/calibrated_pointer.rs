use std::sync::mpsc;
use std::thread;

use aimpoint_algebra::Point2D;
use aimpoint_pointer::{
    CalibrationPrompt, CalibrationRound, PipelineConfig, PointerError, PointerSample, RoundEvent,
    Tracker, Viewport,
};
use aimpoint_quad::MarkerObservation;
use approx::assert_relative_eq;

const VIEWPORT: Viewport = Viewport {
    width: 640.0,
    height: 480.0,
};

/// Markers as seen by a camera whose optical center points at `aim` (normalized
/// screen coordinates). The screen spans 400x300 pixels in the image.
fn frame_for_aim(aim: Point2D) -> [MarkerObservation; 4] {
    let center = Point2D::new(VIEWPORT.width / 2.0, VIEWPORT.height / 2.0);
    let unit = [
        Point2D::new(0.0, 0.0),
        Point2D::new(1.0, 0.0),
        Point2D::new(1.0, 1.0),
        Point2D::new(0.0, 1.0),
    ];
    unit.map(|c| {
        let d = c - aim;
        let p = center + Point2D::new(d.x * 400.0, d.y * 300.0);
        MarkerObservation::detected(p.x, p.y)
    })
}

/// Where the player's phone actually points when they try to aim at `target`.
fn player_aim(target: Point2D) -> Point2D {
    let bias = Point2D::new(0.04, -0.03);
    Point2D::new(0.5, 0.5) + (target - Point2D::new(0.5, 0.5)) * 0.8 + bias
}

#[test]
fn tracker_output_matches_aim() {
    let config = PipelineConfig::default();
    let tracker = Tracker::new("dev", "player", config.tracker);

    for aim in [
        Point2D::new(0.5, 0.5),
        Point2D::new(0.2, 0.7),
        Point2D::new(0.9, 0.1),
    ] {
        let sample = tracker
            .process(&frame_for_aim(aim), VIEWPORT, false)
            .expect("all markers detected");
        assert_relative_eq!(sample.x, aim.x, epsilon = 1e-9);
        assert_relative_eq!(sample.y, aim.y, epsilon = 1e-9);
    }
}

#[test]
fn occlusion_keeps_pointer_stable() {
    let tracker = Tracker::new("dev", "player", PipelineConfig::default().tracker);
    let aim = Point2D::new(0.3, 0.6);

    let mut frame = frame_for_aim(aim);
    frame[0].detected = false;
    let sample = tracker.process(&frame, VIEWPORT, false).expect("3 markers");
    assert_relative_eq!(sample.x, aim.x, epsilon = 1e-9);
    assert_relative_eq!(sample.y, aim.y, epsilon = 1e-9);
}

#[test]
fn calibration_round_over_channel() -> Result<(), Box<dyn std::error::Error>> {
    let config = PipelineConfig::default();
    let shot = Point2D::new(0.6, 0.35);

    let (tx, rx) = mpsc::channel::<PointerSample>();
    let producer = thread::spawn(move || -> Result<(), PointerError> {
        let mut tx = tx;
        let mut tracker = Tracker::new("dev-1", "Alice", config.tracker);
        let targets = CalibrationPrompt::ALL.map(|p| p.target(&config.calibration));
        for target in targets.into_iter().chain([shot]) {
            tracker.publish(&frame_for_aim(player_aim(target)), VIEWPORT, true, &mut tx)?;
        }
        Ok(())
    });

    let mut round = CalibrationRound::new();
    round.register("dev-1")?;

    let mut refined = None;
    for sample in rx.iter() {
        if !round.is_finished() {
            let event = round.fire(&sample.id, sample.position())?;
            assert_ne!(event, RoundEvent::Ignored);
            continue;
        }

        let session = round.session(&sample.id).ok_or("missing session")?;
        refined = Some(session.refine(sample.position(), &config.calibration)?);
    }
    producer.join().map_err(|_| "producer panicked")??;

    let refined = refined.ok_or("no sample after calibration")?;
    assert_relative_eq!(refined.x, shot.x, epsilon = 1e-9);
    assert_relative_eq!(refined.y, shot.y, epsilon = 1e-9);

    let mapper = config.screen_mapper(1920.0, 1080.0);
    let pixel = mapper.map(refined).ok_or("off screen")?;
    assert_relative_eq!(pixel.x, 0.6 * 1720.0 + 100.0, epsilon = 1e-6);
    assert_relative_eq!(pixel.y, 0.35 * 880.0 + 100.0, epsilon = 1e-6);
    Ok(())
}

#[test]
fn dropped_receiver_is_reported() {
    let (mut tx, rx) = mpsc::channel::<PointerSample>();
    drop(rx);

    let mut tracker = Tracker::new("dev", "player", PipelineConfig::default().tracker);
    let result = tracker.publish(
        &frame_for_aim(Point2D::new(0.5, 0.5)),
        VIEWPORT,
        false,
        &mut tx,
    );
    assert!(matches!(result, Err(PointerError::SinkClosed)));
}
