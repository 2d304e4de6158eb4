use std::sync::Arc;

use super::*;
use crate::render::rasterize::RasterLayer;

fn solid(px: [u8; 4]) -> Resolution {
    Resolution::Image(Arc::new(
        RasterLayer::from_premul(2, px.repeat(4)).unwrap(),
    ))
}

fn batch(token: u64, head: [u8; 4]) -> ResolvedBatch {
    ResolvedBatch {
        token: BatchToken(token),
        snapshot: PerCategory([token as usize, 0, 0, 0, 0]),
        layers: PerCategory::from_fn(|c| {
            if c == Category::Head {
                solid(head)
            } else {
                Resolution::Empty
            }
        }),
    }
}

#[test]
fn stale_completion_never_draws() {
    let mut comp = Compositor::new(2, Duration::from_millis(500)).unwrap();
    let now = Instant::now();
    comp.note_request(BatchToken(1));
    comp.note_request(BatchToken(2));

    assert_eq!(
        comp.complete(batch(2, [0, 0, 255, 255]), now).unwrap(),
        DrawOutcome::Drawn
    );
    assert_eq!(
        comp.complete(batch(1, [255, 0, 0, 255]), now).unwrap(),
        DrawOutcome::Stale
    );
    assert_eq!(&comp.surface().data()[..4], &[0, 0, 255, 255]);
    assert_eq!(comp.drawn_token(), Some(BatchToken(2)));
}

#[test]
fn older_batch_arriving_first_is_discarded_when_newer_pending() {
    let mut comp = Compositor::new(2, Duration::from_millis(500)).unwrap();
    comp.note_request(BatchToken(1));
    comp.note_request(BatchToken(2));

    let out = comp
        .complete(batch(1, [255, 0, 0, 255]), Instant::now())
        .unwrap();
    assert_eq!(out, DrawOutcome::Stale);
    assert_eq!(comp.drawn_token(), None);
    assert!(comp.surface().data().iter().all(|&b| b == 0));
}

#[test]
fn same_batch_twice_is_byte_identical() {
    let mut comp = Compositor::new(2, Duration::from_millis(500)).unwrap();
    comp.complete(batch(1, [10, 20, 30, 255]), Instant::now())
        .unwrap();
    let first = comp.surface().data().to_vec();
    comp.complete(batch(1, [10, 20, 30, 255]), Instant::now())
        .unwrap();
    assert_eq!(comp.surface().data(), first.as_slice());
}

#[test]
fn cue_expires_after_pulse() {
    let mut comp = Compositor::new(2, Duration::from_millis(500)).unwrap();
    let t0 = Instant::now();
    assert!(!comp.cue_active(t0));
    comp.complete(batch(1, [0, 0, 0, 255]), t0).unwrap();
    assert!(comp.cue_active(t0 + Duration::from_millis(499)));
    assert!(!comp.cue_active(t0 + Duration::from_millis(500)));
}

#[test]
fn failed_and_empty_layers_draw_nothing() {
    let mut comp = Compositor::new(2, Duration::ZERO).unwrap();
    let mut b = batch(1, [0, 0, 0, 0]);
    b.layers[Category::Head] = Resolution::Failed("boom".to_string());
    comp.complete(b, Instant::now()).unwrap();
    assert!(comp.surface().data().iter().all(|&x| x == 0));
    assert!(matches!(
        comp.resolved(Category::Head),
        Some(Resolution::Failed(_))
    ));
    assert_eq!(comp.drawn_snapshot().unwrap().0, [1, 0, 0, 0, 0]);
}
