// SPDX-License-Identifier: GPL-3.0-only

use crate::utils::PokeQuizError;

/// Hands a URL to the system's default handler without waiting for it
pub fn open_url(url: &str) -> Result<(), PokeQuizError> {
    tracing::debug!("opening {url}");
    open::that_detached(url)?;

    Ok(())
}

/// Plays a cry until it ends
#[cfg(all(unix, feature = "cry-playback"))]
pub async fn play_cry(url: &str) -> Result<(), PokeQuizError> {
    let url = url.to_string();
    tokio::task::spawn_blocking(move || gst_play(&url)).await?
}

/// Without gstreamer the cry is opened like any other URL
#[cfg(not(all(unix, feature = "cry-playback")))]
pub async fn play_cry(url: &str) -> Result<(), PokeQuizError> {
    open_url(url)
}

#[cfg(all(unix, feature = "cry-playback"))]
fn gst_play(url: &str) -> Result<(), PokeQuizError> {
    use gstreamer::prelude::*;

    let audio_err = |e: &dyn std::fmt::Display| PokeQuizError::Audio(e.to_string());

    gstreamer::init().map_err(|e| audio_err(&e))?;

    let playbin = gstreamer::ElementFactory::make("playbin")
        .property("uri", url)
        .build()
        .map_err(|e| audio_err(&e))?;
    let bus = playbin
        .bus()
        .ok_or_else(|| PokeQuizError::Audio(String::from("playbin has no bus")))?;

    playbin
        .set_state(gstreamer::State::Playing)
        .map_err(|e| audio_err(&e))?;

    let mut result = Ok(());
    for msg in bus.iter_timed(gstreamer::ClockTime::NONE) {
        match msg.view() {
            gstreamer::MessageView::Eos(..) => break,
            gstreamer::MessageView::Error(err) => {
                result = Err(audio_err(&err.error()));
                break;
            }
            _ => (),
        }
    }

    playbin
        .set_state(gstreamer::State::Null)
        .map_err(|e| audio_err(&e))?;

    result
}
