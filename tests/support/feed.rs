//! JSON odds feeds written to temporary files for CLI tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Feed with one two-way arbitrage (`arb`), one fair market (`fair`) and a
/// three-way arbitrage in another sport (`derby`). Events start in 2099.
pub const FEED: &str = r#"{
  "events": [
    {
      "id": "arb",
      "name": "Home FC vs Away FC",
      "sport": "soccer_epl",
      "starts_at": "2099-05-01T18:00:00Z",
      "markets": [
        {
          "id": "arb-h2h",
          "type": "h2h",
          "quotes": [
            { "bookmaker": "BookA", "outcome": "Home", "odds": 2.00 },
            { "bookmaker": "BookB", "outcome": "Home", "odds": 2.10 },
            { "bookmaker": "BookC", "outcome": "Away", "odds": 2.05 }
          ]
        }
      ]
    },
    {
      "id": "fair",
      "name": "Even FC vs Level FC",
      "sport": "soccer_epl",
      "starts_at": "2099-05-01T20:00:00Z",
      "markets": [
        {
          "id": "fair-h2h",
          "type": "h2h",
          "quotes": [
            { "bookmaker": "BookA", "outcome": "Home", "odds": 2.00 },
            { "bookmaker": "BookB", "outcome": "Away", "odds": 2.00 }
          ]
        }
      ]
    },
    {
      "id": "derby",
      "name": "North vs South",
      "sport": "soccer_laliga",
      "starts_at": "2099-05-02T18:00:00Z",
      "markets": [
        {
          "id": "derby-h2h",
          "type": "h2h",
          "outcomes": ["Home", "Draw", "Away"],
          "quotes": [
            { "bookmaker": "BookC", "outcome": "Home", "odds": 2.80 },
            { "bookmaker": "BookB", "outcome": "Draw", "odds": 3.90 },
            { "bookmaker": "BookB", "outcome": "Away", "odds": 3.60 }
          ]
        }
      ]
    }
  ]
}"#;

/// Temporary directory holding a feed and optional config.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write temp file");
        path
    }

    pub fn feed(&self) -> PathBuf {
        self.write("odds.json", FEED)
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
