//! Story command handlers.
//!
//! Store-and-fetch only: stories are added from a text file, printed, or
//! removed by id.

use anyhow::Result;
use taleteller_core::{CoreError, NewStory, RepositoryError, Story, StoryRepository};

use super::read_text_file;
use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_separator;
use crate::story_commands::StoryCommand;

/// Execute a story subcommand.
pub async fn execute(ctx: &CliContext, command: StoryCommand) -> Result<()> {
    let stories = ctx.stories().await?;
    match command {
        StoryCommand::Add {
            file,
            title,
            prompt,
        } => {
            let text = read_text_file(&file)?;
            let story = add(&stories, &title, prompt.as_deref(), &text).await?;
            println!("Stored \"{}\" as story {}.", story.title, story.id);
        }
        StoryCommand::Show { id } => match stories.get_by_id(id).await {
            Ok(story) => display_story(&story),
            Err(RepositoryError::NotFound(_)) => not_found(id),
            Err(e) => return Err(CliError::from(e).into()),
        },
        StoryCommand::Remove { id } => match stories.delete(id).await {
            Ok(()) => println!("Removed story {id}."),
            Err(RepositoryError::NotFound(_)) => not_found(id),
            Err(e) => return Err(CliError::from(e).into()),
        },
    }
    Ok(())
}

/// Validate and insert a new story.
pub async fn add(
    stories: &dyn StoryRepository,
    title: &str,
    prompt: Option<&str>,
    text: &str,
) -> Result<Story, CliError> {
    let story = new_story(title, prompt, text)?;
    Ok(stories.insert(&story).await?)
}

fn new_story(title: &str, prompt: Option<&str>, text: &str) -> Result<NewStory, CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("Story title cannot be empty".to_string()));
    }
    if text.trim().is_empty() {
        return Err(CoreError::Validation("Story text cannot be empty".to_string()));
    }

    let story = NewStory::new(title, text.trim());
    Ok(match prompt.map(str::trim).filter(|p| !p.is_empty()) {
        Some(prompt) => story.with_prompt(prompt),
        None => story,
    })
}

fn display_story(story: &Story) {
    println!("Story {}: {}", story.id, story.title);
    if let Some(prompt) = &story.prompt {
        println!("Prompt: {prompt}");
    }
    println!("Added:  {}", story.created_at.format("%Y-%m-%d %H:%M UTC"));
    print_separator(60);
    println!("{}", story.text);
}

fn not_found(id: i64) {
    println!("No story found with id {id}.");
}
