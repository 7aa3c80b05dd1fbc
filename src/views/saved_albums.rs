use super::pagination::Pagination;
use super::{back, errors, Activation, Screen, ScreenId, Transition};
use crate::core::config::UserConfig;
use crate::core::format::{format_album_rows, format_icon};
use crate::core::menu::{Keybinding, Launcher, Menu, Outcome};
use crate::core::model::FullAlbum;
use crate::core::session::Session;
use crate::infra::network::SpotifyApi;
use anyhow::Result;

const PAGE_SIZE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SavedAlbumsAction {
  NextPage,
  PreviousPage,
  PlayAlbum,
}

pub struct SavedAlbums {
  menu: Menu<SavedAlbumsAction>,
  title: String,
  pages: Pagination,
  albums: Vec<FullAlbum>,
  parent: Option<ScreenId>,
}

impl SavedAlbums {
  pub fn new(config: &UserConfig) -> Self {
    let keys = &config.keys;
    let title = format_icon(&config.icons.album, "Albums");
    SavedAlbums {
      menu: Menu::list(
        title.clone(),
        vec![
          Keybinding::new(SavedAlbumsAction::NextPage, &keys.next_page, "Next page"),
          Keybinding::new(
            SavedAlbumsAction::PreviousPage,
            &keys.previous_page,
            "Previous page",
          ),
          Keybinding::new(SavedAlbumsAction::PlayAlbum, &keys.play_album, "Play album"),
        ],
      ),
      title,
      pages: Pagination::new(PAGE_SIZE),
      albums: Vec::new(),
      parent: None,
    }
  }

  fn find(&self, uri: &str) -> Option<&FullAlbum> {
    self.albums.iter().find(|album| album.album.uri == uri)
  }
}

impl Screen for SavedAlbums {
  async fn show<C: SpotifyApi, L: Launcher>(
    &mut self,
    session: &mut Session<C, L>,
    _activation: Activation,
  ) -> Result<Transition> {
    let page = match session
      .client()
      .saved_albums(self.pages.limit(), self.pages.offset())
      .await
    {
      Ok(page) => page,
      Err(e) => {
        session.report(errors::GET_ALBUMS, e).await;
        self.pages.reset();
        return Ok(back(self.parent));
      }
    };
    self.pages.update_total(page.total);
    self.albums = page.items.into_iter().map(|saved| saved.album).collect();

    let albums: Vec<_> = self.albums.iter().map(|full| full.album.clone()).collect();
    self.menu.prompt = self.pages.prompt(&self.title);
    self.menu.message = session.help_message(&self.menu.keys);
    self.menu.rows = format_album_rows(&albums, &session.config.icons.album);

    match session.run_menu(&mut self.menu).await? {
      Outcome::Back | Outcome::Cancelled => {
        self.pages.reset();
        Ok(back(self.parent))
      }
      Outcome::Selected(row) => match self.find(&row.value) {
        Some(album) => Ok(Transition::child(
          ScreenId::AlbumDetail,
          ScreenId::SavedAlbums,
          Activation::Album(Box::new(album.clone())),
        )),
        None => Ok(Transition::to(ScreenId::SavedAlbums)),
      },
      Outcome::CustomKey { key, row } => match key {
        SavedAlbumsAction::NextPage => {
          self.pages.next();
          Ok(Transition::to(ScreenId::SavedAlbums))
        }
        SavedAlbumsAction::PreviousPage => {
          self.pages.previous();
          Ok(Transition::to(ScreenId::SavedAlbums))
        }
        SavedAlbumsAction::PlayAlbum if row.value.is_empty() => {
          Ok(Transition::to(ScreenId::SavedAlbums))
        }
        SavedAlbumsAction::PlayAlbum => {
          if let Err(e) = session.player.play_context(&row.value, None).await {
            session.report(errors::PLAY_ALBUM, e).await;
          }
          Ok(Transition::Exit)
        }
      },
    }
  }

  fn set_parent(&mut self, parent: ScreenId) {
    self.parent = Some(parent);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{album, session, FakeLauncher, FakeSpotify, Step};

  fn spotify() -> FakeSpotify {
    let spotify = FakeSpotify::default();
    *spotify.albums.borrow_mut() = vec![album("First", &["A", "B"]), album("Second", &["C"])];
    spotify
  }

  fn spotify_with(count: usize) -> FakeSpotify {
    let spotify = FakeSpotify::default();
    *spotify.albums.borrow_mut() = (1..=count)
      .map(|i| album(&format!("Album{:02}", i), &["A"]))
      .collect();
    spotify
  }

  #[tokio::test]
  async fn selecting_an_album_opens_it() {
    let mut session = session(spotify(), FakeLauncher::new([Step::Pick(2)]));
    let mut screen = SavedAlbums::new(&session.config);

    assert_eq!(
      screen.show(&mut session, Activation::None).await.unwrap(),
      Transition::child(
        ScreenId::AlbumDetail,
        ScreenId::SavedAlbums,
        Activation::Album(Box::new(album("Second", &["C"])))
      )
    );
    // The album arrives with its tracks, so nothing else is fetched.
    assert_eq!(session.client().calls(), vec!["saved_albums 10 0"]);
  }

  #[tokio::test]
  async fn play_key_plays_the_album_and_exits() {
    let mut session = session(spotify(), FakeLauncher::new([Step::Key(3, 1)]));
    let mut screen = SavedAlbums::new(&session.config);

    assert_eq!(
      screen.show(&mut session, Activation::None).await.unwrap(),
      Transition::Exit
    );
    assert_eq!(
      session.client().calls()[1],
      "play_context spotify:album:first - -"
    );
  }

  #[tokio::test]
  async fn play_key_on_back_row_rerenders() {
    let mut session = session(spotify(), FakeLauncher::new([Step::Key(3, 0)]));
    let mut screen = SavedAlbums::new(&session.config);

    assert_eq!(
      screen.show(&mut session, Activation::None).await.unwrap(),
      Transition::to(ScreenId::SavedAlbums)
    );
    assert_eq!(session.client().calls(), vec!["saved_albums 10 0"]);
  }

  #[tokio::test]
  async fn failed_play_is_reported() {
    let spotify = spotify();
    spotify.fail("play_context");
    let mut session = session(spotify, FakeLauncher::new([Step::Key(3, 2)]));
    let mut screen = SavedAlbums::new(&session.config);

    assert_eq!(
      screen.show(&mut session, Activation::None).await.unwrap(),
      Transition::Exit
    );
    assert_eq!(session.launcher.errors(), vec![errors::PLAY_ALBUM]);
  }

  #[tokio::test]
  async fn fetch_failure_returns_to_parent() {
    let spotify = spotify();
    spotify.fail("saved_albums");
    let mut session = session(spotify, FakeLauncher::default());
    let mut screen = SavedAlbums::new(&session.config);
    screen.set_parent(ScreenId::Main);

    assert_eq!(
      screen.show(&mut session, Activation::None).await.unwrap(),
      Transition::to(ScreenId::Main)
    );
    assert_eq!(session.launcher.errors(), vec![errors::GET_ALBUMS]);
  }

  #[tokio::test]
  async fn page_keys_stay_within_range() {
    let mut session = session(
      spotify_with(25),
      FakeLauncher::new([
        Step::Key(1, 1),
        Step::Key(1, 1),
        Step::Key(2, 1),
        Step::Key(2, 1),
      ]),
    );
    let mut screen = SavedAlbums::new(&session.config);

    for _ in 0..4 {
      assert_eq!(
        screen.show(&mut session, Activation::None).await.unwrap(),
        Transition::to(ScreenId::SavedAlbums)
      );
    }

    assert_eq!(screen.pages.page(), 1);
    assert_eq!(
      session.client().calls(),
      vec!["saved_albums 10 0", "saved_albums 10 10", "saved_albums 10 10", "saved_albums 10 0"]
    );
    let prompts = session.launcher.prompts();
    assert!(prompts[0].ends_with(" 1/2"));
    assert!(prompts[1].ends_with(" 2/2"));
    assert!(prompts[2].ends_with(" 2/2"));
    assert!(prompts[3].ends_with(" 1/2"));
  }

  #[tokio::test]
  async fn back_returns_to_parent_and_resets_page() {
    let mut session = session(
      spotify_with(25),
      FakeLauncher::new([Step::Key(1, 1), Step::Pick(0)]),
    );
    let mut screen = SavedAlbums::new(&session.config);
    screen.set_parent(ScreenId::Main);

    assert_eq!(
      screen.show(&mut session, Activation::None).await.unwrap(),
      Transition::to(ScreenId::SavedAlbums)
    );
    assert_eq!(
      screen.show(&mut session, Activation::None).await.unwrap(),
      Transition::to(ScreenId::Main)
    );
    assert_eq!(screen.pages.page(), 1);

    // Coming back starts over on the first page.
    screen.show(&mut session, Activation::None).await.unwrap();
    assert_eq!(
      session.client().calls(),
      vec!["saved_albums 10 0", "saved_albums 10 10", "saved_albums 10 0"]
    );
  }
}
