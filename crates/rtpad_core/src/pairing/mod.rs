//! Session pairing.
//!
//! Groups a batch's tracks by session and decides, per session, whether its
//! audio and video can be combined into one file:
//!
//! | audio | video | decision |
//! |---|---|---|
//! | 1 | 1 | combine |
//! | 1 | 0 | audio-only anomaly |
//! | 0 | 1 | video-only anomaly |
//! | >1 or >1 | - | ambiguous anomaly |
//! | 0 | 0 | nothing to pair |

mod anomaly;

pub use anomaly::PairingAnomaly;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::naming::RawTrackName;

/// Tracks of one recording session, in batch order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    /// Session start of the first track seen for this session.
    pub session_start_ms: u64,
    pub audio: Vec<PathBuf>,
    pub video: Vec<PathBuf>,
}

/// What to do with one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingDecision {
    /// Exactly one audio and one video input.
    Combine { audio: PathBuf, video: PathBuf },
    /// Something other than a clean pair.
    Anomaly(PairingAnomaly),
    /// No track with a pairing role.
    NothingToPair,
}

impl Session {
    fn new(session_id: &str, session_start_ms: u64) -> Self {
        Self {
            session_id: session_id.to_string(),
            session_start_ms,
            audio: Vec::new(),
            video: Vec::new(),
        }
    }

    pub fn decide(&self) -> PairingDecision {
        match (self.audio.as_slice(), self.video.as_slice()) {
            ([audio], [video]) => PairingDecision::Combine {
                audio: audio.clone(),
                video: video.clone(),
            },
            ([audio], []) => PairingDecision::Anomaly(PairingAnomaly::AudioOnly {
                session_id: self.session_id.clone(),
                path: audio.clone(),
            }),
            ([], [video]) => PairingDecision::Anomaly(PairingAnomaly::VideoOnly {
                session_id: self.session_id.clone(),
                path: video.clone(),
            }),
            ([], []) => PairingDecision::NothingToPair,
            _ => PairingDecision::Anomaly(PairingAnomaly::Ambiguous {
                session_id: self.session_id.clone(),
                audio: self.audio.clone(),
                video: self.video.clone(),
            }),
        }
    }
}

/// Group named tracks into sessions, in order of first appearance.
///
/// Tracks whose role is neither `audio_role` nor `video_role` still open a
/// session but are not listed in it.
pub fn group_sessions<'a, I>(tracks: I, audio_role: &str, video_role: &str) -> Vec<Session>
where
    I: IntoIterator<Item = (&'a Path, &'a RawTrackName)>,
{
    let mut sessions: Vec<Session> = Vec::new();

    for (path, name) in tracks {
        let index = match sessions
            .iter()
            .position(|s| s.session_id == name.session_id)
        {
            Some(i) => i,
            None => {
                sessions.push(Session::new(&name.session_id, name.session_start_ms));
                sessions.len() - 1
            }
        };

        let session = &mut sessions[index];
        if name.track_role == audio_role {
            session.audio.push(path.to_path_buf());
        } else if name.track_role == video_role {
            session.video.push(path.to_path_buf());
        }
    }

    sessions
}

/// `<output_dir>/<session start>-<session id>-combined.<extension>`
pub fn combined_output_path(output_dir: &Path, session: &Session, extension: &str) -> PathBuf {
    output_dir.join(format!(
        "{}-{}-combined.{}",
        session.session_start_ms, session.session_id, extension
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const S1: &str = "02ce3bcb-bf5b-423f-9699-63fca113a952";
    const S2: &str = "9f0d1c2e-1111-4222-8333-444455556666";

    fn name(session: &str, role: &str) -> RawTrackName {
        RawTrackName::parse(&format!("1703174279145-{}-{}-1703174279270.webm", session, role))
            .unwrap()
    }

    fn group(entries: &[(PathBuf, RawTrackName)]) -> Vec<Session> {
        group_sessions(
            entries.iter().map(|(p, n)| (p.as_path(), n)),
            "cam-audio",
            "cam-video",
        )
    }

    #[test]
    fn one_audio_one_video_combines() {
        let entries = vec![
            (PathBuf::from("a.webm"), name(S1, "cam-audio")),
            (PathBuf::from("v.webm"), name(S1, "cam-video")),
        ];
        let sessions = group(&entries);

        assert_eq!(sessions.len(), 1);
        assert_eq!(
            sessions[0].decide(),
            PairingDecision::Combine {
                audio: PathBuf::from("a.webm"),
                video: PathBuf::from("v.webm"),
            }
        );
        assert_eq!(
            combined_output_path(Path::new("out"), &sessions[0], "mp4"),
            PathBuf::from(format!("out/1703174279145-{}-combined.mp4", S1))
        );
    }

    #[test]
    fn sessions_keep_first_appearance_order() {
        let entries = vec![
            (PathBuf::from("b.webm"), name(S2, "cam-audio")),
            (PathBuf::from("a.webm"), name(S1, "cam-video")),
            (PathBuf::from("c.webm"), name(S2, "cam-video")),
        ];
        let sessions = group(&entries);

        let ids: Vec<_> = sessions.iter().map(|s| s.session_id.as_str()).collect();
        assert_eq!(ids, vec![S2, S1]);
        assert_eq!(sessions[0].video, vec![PathBuf::from("c.webm")]);
    }

    #[test]
    fn two_videos_are_ambiguous() {
        let entries = vec![
            (PathBuf::from("a.webm"), name(S1, "cam-audio")),
            (PathBuf::from("v1.webm"), name(S1, "cam-video")),
            (PathBuf::from("v2.webm"), name(S1, "cam-video")),
        ];
        let decision = group(&entries)[0].decide();

        match decision {
            PairingDecision::Anomaly(PairingAnomaly::Ambiguous { video, .. }) => {
                assert_eq!(video.len(), 2)
            }
            other => panic!("unexpected decision {:?}", other),
        }
    }

    #[test]
    fn single_role_sessions_are_reported() {
        let entries = vec![
            (PathBuf::from("a.webm"), name(S1, "cam-audio")),
            (PathBuf::from("v.webm"), name(S2, "cam-video")),
        ];
        let sessions = group(&entries);

        assert!(matches!(
            sessions[0].decide(),
            PairingDecision::Anomaly(PairingAnomaly::AudioOnly { .. })
        ));
        let anomaly = match sessions[1].decide() {
            PairingDecision::Anomaly(a) => a,
            other => panic!("unexpected decision {:?}", other),
        };
        assert_eq!(anomaly.to_string(), "found only video track for v.webm");
        assert_eq!(anomaly.session_id(), S2);
    }

    #[test]
    fn other_roles_leave_nothing_to_pair() {
        let entries = vec![(PathBuf::from("s.webm"), name(S1, "screen-video"))];
        let sessions = group(&entries);

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].decide(), PairingDecision::NothingToPair);
    }

    #[test]
    fn roles_are_configurable() {
        let entries = vec![
            (PathBuf::from("a.webm"), name(S1, "mic")),
            (PathBuf::from("v.webm"), name(S1, "screen-video")),
        ];
        let sessions = group_sessions(
            entries.iter().map(|(p, n)| (p.as_path(), n)),
            "mic",
            "screen-video",
        );

        assert!(matches!(
            sessions[0].decide(),
            PairingDecision::Combine { .. }
        ));
    }
}
