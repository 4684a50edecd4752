//! The `mathtutor init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("mathtutor.toml").exists() {
        println!("mathtutor.toml already exists, skipping.");
    } else {
        std::fs::write("mathtutor.toml", SAMPLE_CONFIG)?;
        println!("Created mathtutor.toml");
    }

    std::fs::create_dir_all("data")?;
    let catalog_path = std::path::Path::new("data/tasks.json");
    if catalog_path.exists() {
        println!("data/tasks.json already exists, skipping.");
    } else {
        std::fs::write(catalog_path, SAMPLE_CATALOG)?;
        println!("Created data/tasks.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: mathtutor validate");
    println!("  2. Run: mathtutor list");
    println!("  3. Run: mathtutor answer basics/arithmetic/1 4");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mathtutor configuration

# Task catalog: a file path or an http(s) URL.
catalog = "data/tasks.json"

# Where progress and stats are stored.
data_dir = ".mathtutor"

# Which calendar decides "today" for streaks: "local" or "utc".
timezone = "local"

request_timeout_secs = 30
"#;

const SAMPLE_CATALOG: &str = r#"{
  "categories": [
    {
      "categoryId": "basics",
      "categoryName": "Basics",
      "description": "Warm-up problems",
      "subcategories": [
        {
          "subcategoryId": "arithmetic",
          "subcategoryName": "Arithmetic",
          "description": "Addition and division",
          "tasks": [
            {
              "id": 1,
              "problemText": "<p>What is 2 + 2?</p>",
              "correctAnswer": "4",
              "solutionText": "<p>2 + 2 = 4</p>",
              "difficulty": "easy",
              "isActual": true
            },
            {
              "id": 2,
              "problemText": "<p>Compute 7 / 2.</p>",
              "correctAnswer": "3,5",
              "solutionText": "<p>7 / 2 = 3.5</p>",
              "isActual": true
            }
          ]
        }
      ]
    }
  ]
}
"#;
