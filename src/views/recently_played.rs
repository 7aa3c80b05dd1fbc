use super::{back, errors, Activation, Screen, ScreenId, Transition};
use crate::core::config::UserConfig;
use crate::core::format::{format_icon, format_track_rows};
use crate::core::menu::{Launcher, Menu, Outcome};
use crate::core::model::Track;
use crate::core::session::Session;
use crate::infra::network::SpotifyApi;
use anyhow::Result;
use std::convert::Infallible;

pub struct RecentlyPlayedScreen {
  menu: Menu<Infallible>,
  parent: Option<ScreenId>,
}

impl RecentlyPlayedScreen {
  pub fn new(config: &UserConfig) -> Self {
    RecentlyPlayedScreen {
      menu: Menu::list(
        format_icon(&config.icons.recently_played, "Recently Played"),
        Vec::new(),
      ),
      parent: None,
    }
  }
}

impl Screen for RecentlyPlayedScreen {
  async fn show<C: SpotifyApi, L: Launcher>(
    &mut self,
    session: &mut Session<C, L>,
    _activation: Activation,
  ) -> Result<Transition> {
    let tracks: Vec<Track> = match session.client().recently_played().await {
      Ok(recent) => recent.items.into_iter().map(|item| item.track).collect(),
      Err(e) => {
        session.report(errors::GET_RECENTLY_PLAYED, e).await;
        return Ok(back(self.parent));
      }
    };

    if tracks.is_empty() {
      session.notify(errors::NO_RECENTLY_PLAYED).await;
      return Ok(back(self.parent));
    }

    self.menu.rows = format_track_rows(&tracks, &session.config.icons.track);

    match session.run_menu(&mut self.menu).await? {
      Outcome::Back | Outcome::Cancelled => Ok(back(self.parent)),
      Outcome::Selected(_) => Ok(Transition::to(ScreenId::RecentlyPlayed)),
      Outcome::CustomKey { key, .. } => match key {},
    }
  }

  fn set_parent(&mut self, parent: ScreenId) {
    self.parent = Some(parent);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{session, tracks, FakeLauncher, FakeSpotify, Step};

  #[tokio::test]
  async fn lists_recent_tracks() {
    let spotify = FakeSpotify::default();
    *spotify.recent.borrow_mut() = tracks(4);
    let mut session = session(spotify, FakeLauncher::new([Step::Pick(0)]));
    let mut screen = RecentlyPlayedScreen::new(&session.config);
    screen.set_parent(ScreenId::Main);

    assert_eq!(
      screen.show(&mut session, Activation::None).await.unwrap(),
      Transition::to(ScreenId::Main)
    );
    assert_eq!(session.launcher.menu_lines()[0].len(), 5);
  }

  #[tokio::test]
  async fn fetch_failure_is_reported() {
    let spotify = FakeSpotify::default();
    spotify.fail("recently_played");
    let mut session = session(spotify, FakeLauncher::default());
    let mut screen = RecentlyPlayedScreen::new(&session.config);
    screen.set_parent(ScreenId::Main);

    assert_eq!(
      screen.show(&mut session, Activation::None).await.unwrap(),
      Transition::to(ScreenId::Main)
    );
    assert_eq!(session.launcher.errors(), vec![errors::GET_RECENTLY_PLAYED]);
  }

  #[tokio::test]
  async fn nothing_played_notifies() {
    let mut session = session(FakeSpotify::default(), FakeLauncher::default());
    let mut screen = RecentlyPlayedScreen::new(&session.config);

    assert_eq!(
      screen.show(&mut session, Activation::None).await.unwrap(),
      Transition::Exit
    );
    assert_eq!(session.launcher.errors(), vec![errors::NO_RECENTLY_PLAYED]);
  }
}
