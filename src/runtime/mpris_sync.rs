use crate::app::App;
use crate::mpris::MprisHandle;

pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    mpris.set_playback(app.playback);
    mpris.set_title(&app.title);
    mpris.set_timeline(app.current_time, app.duration);
}
