use super::constants::LEADERBOARD_SIZE;
use super::types::{LeaderboardEntry, Snake};

/// Top alive snakes by length budget, longest first. Ties keep slice order.
///
/// `player_name` replaces the player's own label, since the viewer edits it outside the world.
pub fn rank(snakes: &[Snake], player_name: &str) -> Vec<LeaderboardEntry> {
    let mut alive: Vec<&Snake> = snakes.iter().filter(|snake| snake.alive).collect();
    alive.sort_by(|a, b| b.target_length.total_cmp(&a.target_length));
    alive
        .into_iter()
        .take(LEADERBOARD_SIZE)
        .map(|snake| LeaderboardEntry {
            name: if snake.is_player() {
                player_name.to_string()
            } else {
                snake.name.clone()
            },
            length: snake.target_length.round() as i64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::snake::create_snake;
    use crate::game::types::{Point, Role};

    fn make_snake(name: &str, role: Role, length: f64, alive: bool) -> Snake {
        let mut snake = create_snake(role, name, "#ffffff", Point::default());
        snake.target_length = length;
        snake.alive = alive;
        snake
    }

    #[test]
    fn ranks_alive_snakes_longest_first_and_caps_at_six() {
        let snakes: Vec<Snake> = (0..9)
            .map(|index| {
                make_snake(
                    &format!("Bot{index}"),
                    Role::Bot,
                    10.0 + index as f64 * 5.0,
                    index != 8,
                )
            })
            .collect();

        let board = rank(&snakes, "Player");

        let names: Vec<&str> = board.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["Bot7", "Bot6", "Bot5", "Bot4", "Bot3", "Bot2"]);
        assert!(board.windows(2).all(|pair| pair[0].length >= pair[1].length));
    }

    #[test]
    fn ties_keep_input_order() {
        let snakes = vec![
            make_snake("First", Role::Bot, 40.0, true),
            make_snake("Second", Role::Bot, 40.0, true),
        ];

        let board = rank(&snakes, "Player");

        assert_eq!(board[0].name, "First");
        assert_eq!(board[1].name, "Second");
    }

    #[test]
    fn player_uses_display_name_and_rounded_length() {
        let snakes = vec![make_snake("You", Role::Player, 60.6, true)];

        let board = rank(&snakes, "Ada");

        assert_eq!(
            board,
            vec![LeaderboardEntry {
                name: "Ada".to_string(),
                length: 61,
            }]
        );
    }

    #[test]
    fn empty_alive_set_ranks_to_empty_list() {
        let snakes = vec![make_snake("Bot1", Role::Bot, 40.0, false)];
        assert!(rank(&snakes, "Player").is_empty());
        assert!(rank(&[], "Player").is_empty());
    }
}
