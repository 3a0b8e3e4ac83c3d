//! In-process stand-in for the story API, served by axum on a loopback port.

use {
  super::*,
  axum::{
    Json, Router,
    extract::{Path, Query, State as Shared},
    response::{IntoResponse, Response as HttpResponse},
    routing::{delete, get, post},
  },
  serde_json::Value,
  std::{
    collections::HashMap,
    sync::{Arc, Mutex},
  },
  tokio::net::TcpListener,
};

pub(crate) const PASSWORD: &str = "secret";

struct Account {
  created_at: DateTime<Utc>,
  favorites: Vec<StoryId>,
  name: String,
  password: String,
}

#[derive(Default)]
struct Backend {
  accounts: HashMap<String, Account>,
  stories: Vec<Story>,
  tokens: HashMap<String, String>,
}

impl Backend {
  fn authorize(&self, token: &str) -> Result<&str, HttpResponse> {
    self
      .tokens
      .get(token)
      .map(String::as_str)
      .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "Invalid token"))
  }

  fn issue_token(&mut self, username: &str) -> String {
    let token = uuid::Uuid::new_v4().to_string();
    self.tokens.insert(token.clone(), username.to_string());
    token
  }

  fn story(&self, id: &StoryId) -> Option<&Story> {
    self.stories.iter().find(|story| &story.story_id == id)
  }

  fn user_json(&self, username: &str) -> Value {
    let Some(account) = self.accounts.get(username) else {
      return Value::Null;
    };

    let favorites = account
      .favorites
      .iter()
      .filter_map(|id| self.story(id))
      .collect::<Vec<_>>();

    let own = self
      .stories
      .iter()
      .filter(|story| story.username == username)
      .collect::<Vec<_>>();

    json!({
      "username": username,
      "name": account.name,
      "createdAt": account.created_at,
      "favorites": favorites,
      "stories": own,
    })
  }
}

type SharedBackend = Arc<Mutex<Backend>>;

#[derive(Deserialize)]
struct TokenQuery {
  token: String,
}

fn failure(status: StatusCode, message: &str) -> HttpResponse {
  (
    status,
    Json(json!({
      "error": {
        "status": status.as_u16(),
        "title": status.canonical_reason(),
        "message": message,
      }
    })),
  )
    .into_response()
}

async fn add_favorite(
  Shared(backend): Shared<SharedBackend>,
  Path((username, id)): Path<(String, String)>,
  Query(query): Query<TokenQuery>,
) -> HttpResponse {
  let mut backend = backend.lock().unwrap();

  match backend.authorize(&query.token) {
    Ok(owner) if owner == username => {}
    Ok(_) => return failure(StatusCode::UNAUTHORIZED, "Token does not match"),
    Err(response) => return response,
  }

  let id = StoryId::from(id);

  if backend.story(&id).is_none() {
    return failure(StatusCode::NOT_FOUND, &format!("No story with ID {id}"));
  }

  if let Some(account) = backend.accounts.get_mut(&username)
    && !account.favorites.contains(&id)
  {
    account.favorites.push(id);
  }

  Json(json!({
    "message": "Favorite Added Successfully!",
    "user": backend.user_json(&username),
  }))
  .into_response()
}

async fn create_story(
  Shared(backend): Shared<SharedBackend>,
  Json(body): Json<Value>,
) -> HttpResponse {
  let mut backend = backend.lock().unwrap();

  let token = body["token"].as_str().unwrap_or_default();

  let username = match backend.authorize(token) {
    Ok(username) => username.to_string(),
    Err(response) => return response,
  };

  let field = |name: &str| body["story"][name].as_str().map(str::to_string);

  let (Some(author), Some(title), Some(url)) =
    (field("author"), field("title"), field("url"))
  else {
    return failure(StatusCode::BAD_REQUEST, "story requires author, title, url");
  };

  let story = Story {
    author,
    created_at: Utc::now(),
    story_id: StoryId::from(uuid::Uuid::new_v4().to_string()),
    title,
    url,
    username,
  };

  backend.stories.insert(0, story.clone());

  (StatusCode::CREATED, Json(json!({ "story": story }))).into_response()
}

async fn delete_story(
  Shared(backend): Shared<SharedBackend>,
  Path(id): Path<String>,
  Query(query): Query<TokenQuery>,
) -> HttpResponse {
  let mut backend = backend.lock().unwrap();

  let username = match backend.authorize(&query.token) {
    Ok(username) => username.to_string(),
    Err(response) => return response,
  };

  let id = StoryId::from(id);

  let Some(story) = backend.story(&id).cloned() else {
    return failure(StatusCode::NOT_FOUND, &format!("No story with ID {id}"));
  };

  if story.username != username {
    return failure(
      StatusCode::FORBIDDEN,
      "You can only delete stories you have posted",
    );
  }

  backend.stories.retain(|story| story.story_id != id);

  Json(json!({ "message": "Deleted story", "story": story })).into_response()
}

async fn get_user(
  Shared(backend): Shared<SharedBackend>,
  Path(username): Path<String>,
  Query(query): Query<TokenQuery>,
) -> HttpResponse {
  let backend = backend.lock().unwrap();

  if !backend.accounts.contains_key(&username) {
    return failure(
      StatusCode::NOT_FOUND,
      &format!("No user with username {username}"),
    );
  }

  match backend.authorize(&query.token) {
    Ok(owner) if owner == username => {
      Json(json!({ "user": backend.user_json(&username) })).into_response()
    }
    Ok(_) => failure(StatusCode::UNAUTHORIZED, "Token does not match"),
    Err(response) => response,
  }
}

async fn list_stories(
  Shared(backend): Shared<SharedBackend>,
) -> HttpResponse {
  let backend = backend.lock().unwrap();

  Json(json!({ "stories": backend.stories })).into_response()
}

async fn login(
  Shared(backend): Shared<SharedBackend>,
  Json(body): Json<Value>,
) -> HttpResponse {
  let mut backend = backend.lock().unwrap();

  let username = body["user"]["username"].as_str().unwrap_or_default();
  let password = body["user"]["password"].as_str().unwrap_or_default();

  let Some(account) = backend.accounts.get(username) else {
    return failure(
      StatusCode::NOT_FOUND,
      &format!("No user with username {username}"),
    );
  };

  if account.password != password {
    return failure(StatusCode::UNAUTHORIZED, "Invalid password");
  }

  let token = backend.issue_token(username);

  Json(json!({ "token": token, "user": backend.user_json(username) }))
    .into_response()
}

async fn remove_favorite(
  Shared(backend): Shared<SharedBackend>,
  Path((username, id)): Path<(String, String)>,
  Query(query): Query<TokenQuery>,
) -> HttpResponse {
  let mut backend = backend.lock().unwrap();

  match backend.authorize(&query.token) {
    Ok(owner) if owner == username => {}
    Ok(_) => return failure(StatusCode::UNAUTHORIZED, "Token does not match"),
    Err(response) => return response,
  }

  let id = StoryId::from(id);

  if backend.story(&id).is_none() {
    return failure(StatusCode::NOT_FOUND, &format!("No story with ID {id}"));
  }

  if let Some(account) = backend.accounts.get_mut(&username) {
    account.favorites.retain(|favorite| favorite != &id);
  }

  Json(json!({
    "message": "Favorite Removed Successfully!",
    "user": backend.user_json(&username),
  }))
  .into_response()
}

async fn signup(
  Shared(backend): Shared<SharedBackend>,
  Json(body): Json<Value>,
) -> HttpResponse {
  let mut backend = backend.lock().unwrap();

  let field = |name: &str| body["user"][name].as_str().map(str::to_string);

  let (Some(username), Some(password), Some(name)) =
    (field("username"), field("password"), field("name"))
  else {
    return failure(StatusCode::BAD_REQUEST, "user requires username, password, name");
  };

  if backend.accounts.contains_key(&username) {
    return failure(
      StatusCode::CONFLICT,
      &format!("There already exists a user with username '{username}'"),
    );
  }

  backend.accounts.insert(
    username.clone(),
    Account {
      created_at: Utc::now(),
      favorites: Vec::new(),
      name,
      password,
    },
  );

  let token = backend.issue_token(&username);

  (
    StatusCode::CREATED,
    Json(json!({ "token": token, "user": backend.user_json(&username) })),
  )
    .into_response()
}

pub(crate) struct TestServer {
  backend: SharedBackend,
  pub(crate) client: Client,
}

impl TestServer {
  pub(crate) fn delete_story(&self, id: &StoryId) {
    self
      .backend
      .lock()
      .unwrap()
      .stories
      .retain(|story| &story.story_id != id);
  }

  pub(crate) fn has_story(&self, id: &StoryId) -> bool {
    self.backend.lock().unwrap().story(id).is_some()
  }

  /// Inserts a story directly, appended so seeding order is server order.
  pub(crate) fn seed_story(&self, title: &str, url: &str, username: &str) -> Story {
    let story = Story {
      author: username.to_string(),
      created_at: Utc::now(),
      story_id: StoryId::from(uuid::Uuid::new_v4().to_string()),
      title: title.to_string(),
      url: url.to_string(),
      username: username.to_string(),
    };

    self.backend.lock().unwrap().stories.push(story.clone());

    story
  }

  pub(crate) async fn sign_up(&self, username: &str) -> User {
    User::signup(&self.client, username, PASSWORD, username)
      .await
      .unwrap()
  }

  pub(crate) async fn spawn() -> Self {
    let backend = SharedBackend::default();

    let router = Router::new()
      .route("/stories", get(list_stories).post(create_story))
      .route("/stories/{id}", delete(delete_story))
      .route("/signup", post(signup))
      .route("/login", post(login))
      .route("/users/{username}", get(get_user))
      .route(
        "/users/{username}/favorites/{id}",
        post(add_favorite).delete(remove_favorite),
      )
      .with_state(backend.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
      axum::serve(listener, router).await.unwrap();
    });

    let base_url = Url::parse(&format!("http://{addr}")).unwrap();

    Self {
      backend,
      client: Client::new(base_url).unwrap(),
    }
  }
}
