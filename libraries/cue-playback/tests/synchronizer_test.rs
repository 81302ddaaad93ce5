//! Integration tests for the playback synchronizer
//!
//! Every test drives the synchronizer through its public operations against
//! recording fake surfaces.

mod common;

use common::*;
use cue_playback::{
    GatewayError, NoticeKind, Outcome, PlaybackConfig, PlaybackError, PlaybackEvent,
    PlaybackStatus, Preferences, ReportedState, SurfaceEvent, SurfaceSlot, Synchronizer, TrackId,
};
use std::time::Duration;

const HIDDEN: SurfaceSlot = SurfaceSlot::Hidden;

fn playing(sync: &mut Synchronizer, slot: SurfaceSlot) {
    sync.handle_surface_event(slot, SurfaceEvent::StateChanged(ReportedState::Playing))
        .unwrap();
}

fn notices(events: &[PlaybackEvent], kind: NoticeKind) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, PlaybackEvent::Notice { kind: k, .. } if *k == kind))
        .count()
}

// ===== playTrack =====

#[test]
fn play_track_loads_hidden_surface_and_reveals_transport() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2, 3], &[(1, 1), (2, 1), (3, 1)]);

    let outcome = sync.play_track(TrackId(2)).unwrap();

    assert_eq!(outcome, Outcome::Started(TrackId(2)));
    assert_eq!(sync.current_id(), Some(TrackId(2)));
    assert_eq!(sync.status(), PlaybackStatus::Loading);
    assert!(!sync.is_embedded());
    assert!(sync.session().transport_visible);
    assert_eq!(
        harness.calls()[0],
        Call::Create {
            slot: HIDDEN,
            video: video_of(2),
            autoplay: true,
            start_at: Duration::ZERO,
        }
    );

    let events = sync.drain_events();
    assert!(events.contains(&PlaybackEvent::ProgressReset));
    assert!(events.contains(&PlaybackEvent::TransportVisibility { visible: true }));
    assert!(events.contains(&PlaybackEvent::TrackChanged {
        track_id: Some(TrackId(2)),
        previous_track_id: None,
    }));

    // Playing is mirrored from the surface
    playing(&mut sync, HIDDEN);
    assert_eq!(sync.status(), PlaybackStatus::Playing);
    assert_eq!(sync.display_record().unwrap().title, "Track 2");
}

#[test]
fn second_play_reuses_hidden_surface() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1)]);

    sync.play_track(TrackId(1)).unwrap();
    sync.play_track(TrackId(2)).unwrap();

    let creates = harness
        .calls()
        .iter()
        .filter(|call| matches!(call, Call::Create { .. }))
        .count();
    assert_eq!(creates, 1);
    assert!(harness.calls().contains(&Call::Load {
        slot: HIDDEN,
        video: video_of(2),
        autoplay: true,
        start_at: Duration::ZERO,
    }));
}

#[test]
fn play_track_missing_from_page_changes_nothing() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1), (9, 2)]);

    let err = sync.play_track(TrackId(9)).unwrap_err();

    assert!(matches!(err, PlaybackError::TrackNotOnPage(TrackId(9))));
    assert!(err.is_resolution());
    assert_eq!(sync.current_id(), None);
    assert!(harness.calls().is_empty());
    assert_eq!(notices(&sync.drain_events(), NoticeKind::Resolution), 1);
}

#[test]
fn play_track_twice_is_idempotent() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1)]);

    sync.play_track(TrackId(1)).unwrap();
    let session = sync.session();
    let calls = harness.calls().len();

    let outcome = sync.play_track(TrackId(1)).unwrap();

    assert_eq!(outcome, Outcome::Unchanged);
    assert_eq!(sync.session(), session);
    assert_eq!(harness.calls().len(), calls);
}

#[test]
fn play_track_on_playing_track_toggles_pause() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1)]);
    sync.play_track(TrackId(1)).unwrap();
    playing(&mut sync, HIDDEN);

    let outcome = sync.play_track(TrackId(1)).unwrap();

    assert_eq!(outcome, Outcome::Toggled(PlaybackStatus::Paused));
    assert_eq!(sync.status(), PlaybackStatus::Paused);
    assert_eq!(harness.calls().last(), Some(&Call::Pause(HIDDEN)));

    // And a paused current track resumes in place
    sync.play_track(TrackId(1)).unwrap();
    assert_eq!(sync.status(), PlaybackStatus::Playing);
    assert_eq!(harness.calls().last(), Some(&Call::Play(HIDDEN)));
}

#[test]
fn unembeddable_link_opens_externally() {
    let harness = Harness::new();
    let mut sync = Synchronizer::new(PlaybackConfig::default(), harness.factory());
    sync.on_catalogue_refresh(
        cue_playback::PageData {
            tracks: vec![external_track(1)],
            ..page(&[], 1, 1)
        },
        master(&[(1, 1)]),
    );
    sync.drain_events();

    let outcome = sync.play_track(TrackId(1)).unwrap();

    assert_eq!(outcome, Outcome::OpenedExternally(TrackId(1)));
    assert_eq!(sync.current_id(), None);
    assert!(harness.calls().is_empty());
    assert!(sync.drain_events().contains(&PlaybackEvent::OpenExternal {
        url: external_track(1).link,
    }));
}

#[test]
fn unavailable_player_degrades_to_external_links() {
    let harness = Harness::new();
    harness.fail_creation();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1)]);

    assert_eq!(
        sync.play_track(TrackId(1)).unwrap(),
        Outcome::OpenedExternally(TrackId(1))
    );
    assert!(sync.is_degraded());
    assert_eq!(
        sync.play_track(TrackId(2)).unwrap(),
        Outcome::OpenedExternally(TrackId(2))
    );
    assert_eq!(sync.current_id(), None);
}

// ===== togglePlayPause / stop =====

#[test]
fn toggle_without_track_is_noop() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1], &[(1, 1)]);

    assert_eq!(sync.toggle_play_pause().unwrap(), Outcome::Unchanged);
    assert!(harness.calls().is_empty());
}

#[test]
fn stop_clears_session_and_destroys_embeds() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2, 3], &[(1, 1), (2, 1), (3, 1)]);
    sync.play_track(TrackId(1)).unwrap();
    playing(&mut sync, HIDDEN);
    sync.enter_embed_mode(TrackId(3)).unwrap();

    sync.stop().unwrap();

    let session = sync.session();
    assert_eq!(session.current_track, None);
    assert_eq!(session.status, PlaybackStatus::Idle);
    assert!(!session.transport_visible);
    assert!(session.open_embeds.is_empty());
    assert!(harness.calls().contains(&Call::Destroy(SurfaceSlot::Embed(TrackId(3)))));
    assert!(harness.playing_slots().is_empty());

    // The hidden surface is kept for the next play
    assert!(!harness.state(HIDDEN).unwrap().destroyed);
}

// ===== Traversal =====

#[test]
fn next_wraps_from_last_to_first() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2, 3], &[(1, 1), (2, 1), (3, 1)]);
    sync.play_track(TrackId(3)).unwrap();

    assert_eq!(sync.play_next().unwrap(), Outcome::Started(TrackId(1)));
    assert_eq!(sync.current_id(), Some(TrackId(1)));
}

#[test]
fn previous_wraps_from_first_to_last() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2, 3], &[(1, 1), (2, 1), (3, 1)]);
    sync.play_track(TrackId(1)).unwrap();

    assert_eq!(sync.play_previous().unwrap(), Outcome::Started(TrackId(3)));
}

#[test]
fn traversal_on_empty_master_is_noop() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[], &[]);

    assert_eq!(sync.play_next().unwrap(), Outcome::Unchanged);
    assert_eq!(sync.play_previous().unwrap(), Outcome::Unchanged);
    assert_eq!(sync.session().current_track, None);
    assert!(harness.calls().is_empty());
}

#[test]
fn previous_past_threshold_restarts_current_track() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1)]);
    sync.play_track(TrackId(2)).unwrap();
    playing(&mut sync, HIDDEN);
    harness.set_time(HIDDEN, Duration::from_secs(12));

    let outcome = sync.play_previous().unwrap();

    assert_eq!(outcome, Outcome::Restarted(TrackId(2)));
    assert_eq!(sync.current_id(), Some(TrackId(2)));
    assert!(harness.calls().contains(&Call::Seek(HIDDEN, Duration::ZERO)));
    assert_eq!(sync.status(), PlaybackStatus::Playing);
}

#[test]
fn previous_past_threshold_plays_paused_track_from_the_top() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1)]);
    sync.play_track(TrackId(2)).unwrap();
    playing(&mut sync, HIDDEN);
    sync.toggle_play_pause().unwrap();
    harness.set_time(HIDDEN, Duration::from_secs(12));
    harness.clear();

    let outcome = sync.play_previous().unwrap();

    assert_eq!(outcome, Outcome::Restarted(TrackId(2)));
    assert_eq!(
        harness.calls(),
        vec![Call::Seek(HIDDEN, Duration::ZERO), Call::Play(HIDDEN)]
    );
    assert_eq!(sync.status(), PlaybackStatus::Playing);
    assert_eq!(harness.playing_slots(), vec![HIDDEN]);
}

#[test]
fn previous_within_threshold_moves_back() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1)]);
    sync.play_track(TrackId(2)).unwrap();
    harness.set_time(HIDDEN, Duration::from_secs(3));

    assert_eq!(sync.play_previous().unwrap(), Outcome::Started(TrackId(1)));
}

#[test]
fn shuffle_round_trip_restores_master_order() {
    let harness = Harness::new();
    let entries: Vec<(u64, u32)> = (1..=20).map(|id| (id, 1)).collect();
    let ids: Vec<u64> = (1..=20).collect();
    let mut sync = synchronizer(&harness, &ids, &entries);
    let original = sync.traversal().to_vec();

    sync.set_shuffle(true);
    let mut shuffled: Vec<u64> = sync.traversal().iter().map(|entry| entry.id.get()).collect();
    shuffled.sort_unstable();
    assert_eq!(shuffled, ids);

    sync.set_shuffle(false);
    assert_eq!(sync.traversal(), original.as_slice());
}

// ===== Cross-page reconciliation =====

#[test]
fn cross_page_next_fetches_before_loading() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1), (3, 2)]);
    sync.play_track(TrackId(2)).unwrap();
    playing(&mut sync, HIDDEN);
    sync.enter_embed_mode(TrackId(1)).unwrap();
    harness.clear();

    let Outcome::PageRequested(request) = sync.play_next().unwrap() else {
        panic!("expected a page request");
    };
    assert_eq!(request.page, 2);
    assert!(!request.include_master);
    // Page-1 embeds are torn down before the fetch
    assert!(harness.calls().contains(&Call::Destroy(SurfaceSlot::Embed(TrackId(1)))));
    assert_eq!(sync.current_id(), Some(TrackId(2)));

    harness.record_fetch(request.page, request.include_master);
    let outcome = sync
        .complete_fetch(request.token, Ok(update(page(&[3], 2, 2), None)))
        .unwrap();

    assert_eq!(outcome, Outcome::Started(TrackId(3)));
    assert_eq!(sync.current_id(), Some(TrackId(3)));
    assert_eq!(sync.page_list().page(), 2);

    let fetch = harness
        .position(|call| matches!(call, Call::Fetch { page: 2, .. }))
        .unwrap();
    let load = harness
        .position(|call| matches!(call, Call::Load { video, .. } if *video == video_of(3)))
        .unwrap();
    assert!(fetch < load, "fetch must precede the load of track 3");
}

#[test]
fn stale_fetch_is_discarded() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1), (3, 2), (4, 3)]);

    let Outcome::PageRequested(first) = sync.request_page(2) else {
        panic!("expected a page request");
    };
    let Outcome::PageRequested(second) = sync.request_page(3) else {
        panic!("expected a page request");
    };

    // The older response lands first and must not be applied
    let outcome = sync
        .complete_fetch(first.token, Ok(update(page(&[3], 2, 3), None)))
        .unwrap();
    assert_eq!(outcome, Outcome::Discarded);
    assert_eq!(sync.page_list().page(), 1);

    let outcome = sync
        .complete_fetch(second.token, Ok(update(page(&[4], 3, 3), None)))
        .unwrap();
    assert_eq!(outcome, Outcome::CatalogueApplied);
    assert_eq!(sync.page_list().page(), 3);

    // Replaying the applied token is stale as well
    assert_eq!(
        sync.complete_fetch(second.token, Ok(update(page(&[3], 2, 3), None)))
            .unwrap(),
        Outcome::Discarded
    );
}

#[test]
fn filter_change_supersedes_pending_page_transition() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1), (3, 2)]);
    sync.play_track(TrackId(2)).unwrap();

    let Outcome::PageRequested(transition) = sync.play_next().unwrap() else {
        panic!("expected a page request");
    };
    let mut query = cue_playback::CatalogueQuery::default();
    query
        .filters
        .insert("producer_filter".to_string(), "Producer".to_string());
    let Outcome::PageRequested(refetch) = sync.request_catalogue(query.clone()) else {
        panic!("expected a page request");
    };
    assert!(refetch.include_master);

    sync.complete_fetch(
        refetch.token,
        Ok(update(page(&[2, 3], 1, 1), Some(master(&[(2, 1), (3, 1)])))),
    )
    .unwrap();
    assert_eq!(sync.query(), &query);

    // The deferred play of track 3 died with the superseded transition
    let outcome = sync
        .complete_fetch(transition.token, Ok(update(page(&[3], 2, 2), None)))
        .unwrap();
    assert_eq!(outcome, Outcome::Discarded);
    assert_eq!(sync.current_id(), Some(TrackId(2)));
}

#[test]
fn failed_transition_leaves_playback_untouched() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1), (3, 2)]);
    sync.play_track(TrackId(2)).unwrap();
    playing(&mut sync, HIDDEN);
    let before = sync.session();

    let Outcome::PageRequested(request) = sync.play_next().unwrap() else {
        panic!("expected a page request");
    };
    sync.drain_events();
    let err = sync
        .complete_fetch(
            request.token,
            Err(GatewayError::Server {
                status: 502,
                message: "Bad Gateway".into(),
            }),
        )
        .unwrap_err();

    assert!(matches!(err, PlaybackError::Gateway(_)));
    assert_eq!(sync.session(), before);
    assert_eq!(sync.page_list().page(), 1);
    assert!(!sync.is_fetch_pending());
    let events = sync.drain_events();
    assert!(events
        .iter()
        .any(|event| matches!(event, PlaybackEvent::CatalogueFailed { .. })));
    assert_eq!(notices(&events, NoticeKind::Network), 1);
    assert_eq!(harness.playing_slots(), vec![HIDDEN]);
}

#[test]
fn deferred_track_missing_from_fetched_page_is_a_resolution_error() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1), (3, 2)]);
    sync.play_track(TrackId(2)).unwrap();

    let Outcome::PageRequested(request) = sync.play_next().unwrap() else {
        panic!("expected a page request");
    };
    // Page boundaries shifted: track 3 moved to page 3
    let err = sync
        .complete_fetch(request.token, Ok(update(page(&[4], 2, 3), None)))
        .unwrap_err();

    assert!(matches!(err, PlaybackError::TrackNotOnPage(TrackId(3))));
    assert_eq!(sync.current_id(), Some(TrackId(2)));
    assert_eq!(sync.page_list().page(), 2);
    assert_eq!(notices(&sync.drain_events(), NoticeKind::Resolution), 1);
}

#[test]
fn stop_during_page_transition_starts_nothing() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1), (3, 2)]);
    sync.play_track(TrackId(2)).unwrap();
    playing(&mut sync, HIDDEN);

    let Outcome::PageRequested(request) = sync.play_next().unwrap() else {
        panic!("expected a page request");
    };
    sync.stop().unwrap();
    harness.clear();

    let outcome = sync
        .complete_fetch(request.token, Ok(update(page(&[3], 2, 2), None)))
        .unwrap();

    assert_eq!(outcome, Outcome::CatalogueApplied);
    assert_eq!(sync.page_list().page(), 2);
    assert_eq!(sync.current_id(), None);
    assert_eq!(sync.status(), PlaybackStatus::Idle);
    assert!(!sync.session().transport_visible);
    assert!(!sync.is_loading_visible());
    assert!(harness.calls().is_empty());
}

#[test]
fn user_choice_during_page_transition_wins() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1), (3, 2)]);
    sync.play_track(TrackId(2)).unwrap();
    playing(&mut sync, HIDDEN);

    let Outcome::PageRequested(request) = sync.play_next().unwrap() else {
        panic!("expected a page request");
    };
    assert_eq!(sync.play_track(TrackId(1)).unwrap(), Outcome::Started(TrackId(1)));
    harness.clear();

    let outcome = sync
        .complete_fetch(request.token, Ok(update(page(&[3], 2, 2), None)))
        .unwrap();

    assert_eq!(outcome, Outcome::CatalogueApplied);
    assert_eq!(sync.current_id(), Some(TrackId(1)));
    assert!(!harness
        .calls()
        .iter()
        .any(|call| matches!(call, Call::Load { video, .. } if *video == video_of(3))));
}

#[test]
fn loading_indicator_follows_the_pending_fetch() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1], &[(1, 1), (2, 2)]);

    assert!(!sync.show_loading(), "nothing pending yet");

    let Outcome::PageRequested(request) = sync.request_page(2) else {
        panic!("expected a page request");
    };
    assert!(sync.show_loading());
    assert!(!sync.show_loading(), "already visible");

    sync.complete_fetch(request.token, Ok(update(page(&[2], 2, 2), None)))
        .unwrap();
    assert!(!sync.is_loading_visible());
    let events = sync.drain_events();
    assert!(events.contains(&PlaybackEvent::LoadingIndicator { visible: true }));
    assert!(events.contains(&PlaybackEvent::LoadingIndicator { visible: false }));
}

#[test]
fn filtered_out_current_track_stops_playback() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[4, 5, 6], &[(4, 1), (5, 1), (6, 1)]);
    sync.play_track(TrackId(5)).unwrap();
    playing(&mut sync, HIDDEN);
    sync.enter_embed_mode(TrackId(6)).unwrap();

    sync.on_catalogue_refresh(page(&[4, 6], 1, 1), master(&[(4, 1), (6, 1)]));

    let session = sync.session();
    assert_eq!(session.current_track, None);
    assert!(!session.is_playing());
    assert!(session.open_embeds.is_empty());
    assert!(harness.playing_slots().is_empty());
}

#[test]
fn refresh_keeps_playing_track_that_survives() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[4, 5, 6], &[(4, 1), (5, 1), (6, 1)]);
    sync.play_track(TrackId(5)).unwrap();
    playing(&mut sync, HIDDEN);
    harness.clear();

    sync.on_catalogue_refresh(page(&[5, 4], 1, 1), master(&[(5, 1), (4, 1)]));

    assert_eq!(sync.current_id(), Some(TrackId(5)));
    assert_eq!(sync.status(), PlaybackStatus::Playing);
    assert!(harness.calls().is_empty());
}

// ===== Surface lifecycle =====

#[test]
fn ended_with_repeat_restarts_track() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1)]);
    sync.set_repeat(true);
    sync.play_track(TrackId(1)).unwrap();
    playing(&mut sync, HIDDEN);

    let outcome = sync
        .handle_surface_event(HIDDEN, SurfaceEvent::StateChanged(ReportedState::Ended))
        .unwrap();

    assert_eq!(outcome, Outcome::Restarted(TrackId(1)));
    let calls = harness.calls();
    assert_eq!(
        &calls[calls.len() - 2..],
        &[Call::Seek(HIDDEN, Duration::ZERO), Call::Play(HIDDEN)]
    );
    assert_eq!(sync.status(), PlaybackStatus::Playing);
}

#[test]
fn ended_without_repeat_advances() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1)]);
    sync.play_track(TrackId(1)).unwrap();
    playing(&mut sync, HIDDEN);

    let outcome = sync
        .handle_surface_event(HIDDEN, SurfaceEvent::StateChanged(ReportedState::Ended))
        .unwrap();

    assert_eq!(outcome, Outcome::Started(TrackId(2)));
}

#[test]
fn playback_error_notifies_and_skips() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1)]);
    sync.play_track(TrackId(1)).unwrap();
    sync.drain_events();

    let outcome = sync
        .handle_surface_event(HIDDEN, SurfaceEvent::Error(150))
        .unwrap();

    assert_eq!(outcome, Outcome::Started(TrackId(2)));
    let events = sync.drain_events();
    let message = events
        .iter()
        .find_map(|event| match event {
            PlaybackEvent::Notice {
                kind: NoticeKind::Playback,
                message,
            } => Some(message.clone()),
            _ => None,
        })
        .unwrap();
    assert!(message.contains("150"));
}

#[test]
fn playback_error_with_nothing_to_skip_to_stops() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1], &[(1, 1)]);
    sync.play_track(TrackId(1)).unwrap();
    sync.drain_events();
    harness.clear();

    let outcome = sync
        .handle_surface_event(HIDDEN, SurfaceEvent::Error(150))
        .unwrap();

    assert_eq!(outcome, Outcome::Stopped);
    assert_eq!(sync.current_id(), None);
    assert!(!harness.calls().contains(&Call::Play(HIDDEN)));
    assert!(!harness
        .calls()
        .iter()
        .any(|call| matches!(call, Call::Load { .. })));
    assert_eq!(notices(&sync.drain_events(), NoticeKind::Playback), 1);
}

#[test]
fn single_track_ended_loops_in_place() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1], &[(1, 1)]);
    sync.play_track(TrackId(1)).unwrap();
    playing(&mut sync, HIDDEN);

    let outcome = sync
        .handle_surface_event(HIDDEN, SurfaceEvent::StateChanged(ReportedState::Ended))
        .unwrap();

    assert_eq!(outcome, Outcome::Restarted(TrackId(1)));
    assert_eq!(harness.calls().last(), Some(&Call::Play(HIDDEN)));
}

// ===== Volume =====

#[test]
fn toggle_mute_at_zero_restores_audible_level() {
    let harness = Harness::new();
    let mut config = PlaybackConfig::default();
    Preferences {
        volume: 0,
        muted: true,
    }
    .apply_to(&mut config);
    let mut sync = Synchronizer::new(config, harness.factory());

    sync.toggle_mute().unwrap();

    assert!(!sync.volume().is_muted());
    assert!(sync.volume().level() > 0);
    assert!(sync.drain_events().contains(&PlaybackEvent::VolumeChanged {
        level: 50,
        is_muted: false,
    }));
}

#[test]
fn volume_applies_to_active_surface() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1], &[(1, 1)]);
    sync.play_track(TrackId(1)).unwrap();

    sync.set_volume(30).unwrap();
    sync.toggle_mute().unwrap();

    let hidden = harness.state(HIDDEN).unwrap();
    assert_eq!(hidden.volume, 30);
    assert!(hidden.muted);
    assert_eq!(sync.preferences(), Preferences { volume: 30, muted: true });
}

// ===== Progress =====

#[test]
fn progress_polling_pauses_while_dragging() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1], &[(1, 1)]);
    assert!(sync.poll_progress().is_none(), "nothing loaded");

    sync.play_track(TrackId(1)).unwrap();
    harness.set_time(HIDDEN, Duration::from_secs(20));
    let sample = sync.poll_progress().unwrap();
    assert_eq!(sample.position, Duration::from_secs(20));
    assert_eq!(sample.duration, Some(Duration::from_secs(180)));

    sync.begin_seek_drag();
    assert!(sync.poll_progress().is_none());

    sync.end_seek_drag(Duration::from_secs(90)).unwrap();
    assert_eq!(harness.calls().last(), Some(&Call::Seek(HIDDEN, Duration::from_secs(90))));
    assert_eq!(sync.poll_progress().unwrap().position, Duration::from_secs(90));
}

#[test]
fn new_track_resets_progress() {
    let harness = Harness::new();
    let mut sync = synchronizer(&harness, &[1, 2], &[(1, 1), (2, 1)]);
    sync.play_track(TrackId(1)).unwrap();
    harness.set_time(HIDDEN, Duration::from_secs(60));
    sync.poll_progress();

    sync.play_track(TrackId(2)).unwrap();

    assert_eq!(sync.progress().position, Duration::ZERO);
}
