/*
 * Responsibility
 * - Pure ListViewState -> text rendering; no IO, no state, no decisions
 * - The app loop prints whatever this returns after every command
 */
use crate::state::{EditTarget, ListMode, ListViewState};

pub fn render(state: &ListViewState) -> String {
    if let Some(editing) = &state.editing {
        return render_form(editing);
    }

    let mut out = String::new();

    if !state.search_term.is_empty() {
        out.push_str(&format!("Search: \"{}\"\n", state.search_term));
    }

    if state.is_loading {
        out.push_str("Loading...\n");
        return out;
    }

    if state.items.is_empty() {
        if state.search_term.is_empty() {
            out.push_str("No posts available\n");
        } else {
            out.push_str("No posts found matching your search\n");
        }
        return out;
    }

    for post in &state.items {
        out.push_str(&format!(
            "#{:<5} {}  ({})\n       {}\n",
            post.id,
            post.title,
            post.created_at.format("%Y-%m-%d"),
            post.content,
        ));
    }

    if state.mode == ListMode::Paged {
        out.push_str(&format!(
            "\nPage {} of {}\n",
            state.current_page, state.total_pages
        ));
    }

    out
}

fn render_form(editing: &EditTarget) -> String {
    match editing {
        EditTarget::New => "Creating a new post\n".to_string(),
        EditTarget::Existing(post) => {
            format!("Editing post #{} ({})\n", post.id, post.title)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::dto::Post;
    use crate::state::ListViewState;
    use chrono::Utc;

    fn state_with_items(items: Vec<Post>) -> ListViewState {
        let mut state = ListViewState::new();
        state.is_loading = false;
        state.items = items;
        state.total_pages = 1;
        state
    }

    #[test]
    fn empty_paged_view_and_empty_search_read_differently() {
        let state = state_with_items(vec![]);
        assert!(render(&state).contains("No posts available"));

        let mut state = state_with_items(vec![]);
        state.search_term = "x".into();
        state.mode = ListMode::Search;
        assert!(render(&state).contains("No posts found matching your search"));
    }

    #[test]
    fn paged_view_shows_the_page_footer_and_search_does_not() {
        let post = Post {
            id: 1,
            title: "t".into(),
            content: "c".into(),
            user_id: 1,
            created_at: Utc::now(),
        };

        let state = state_with_items(vec![post.clone()]);
        assert!(render(&state).contains("Page 1 of 1"));

        let mut state = state_with_items(vec![post]);
        state.mode = ListMode::Search;
        state.search_term = "t".into();
        assert!(!render(&state).contains("Page 1 of"));
    }

    #[test]
    fn form_suppresses_the_list() {
        let mut state = state_with_items(vec![]);
        state.editing = Some(EditTarget::New);

        let out = render(&state);
        assert!(out.contains("Creating a new post"));
        assert!(!out.contains("No posts"));
    }
}
