use crate::mpris::MprisHandle;
use crate::player::Player;

pub fn update_mpris(mpris: &MprisHandle, player: &Player) {
    mpris.set_track_metadata(player.state().current());
    mpris.set_playback(player.playback());
}
