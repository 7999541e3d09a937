//! Bundled SQLite schema history.
//!
//! Append only: a shipped migration must never be edited, add a new one instead.

use super::{Migration, TableNames};

pub const MIGRATIONS: &[Migration<'static>] = &[
    // v1
    &[
        r#"
		CREATE TABLE "users" (
			"id" integer PRIMARY KEY AUTOINCREMENT NOT NULL,
			"email" text NOT NULL,
			"profile_image_url" text,
			"password_salt" blob,
			"password_hash" blob,
			"password_iterations" integer,
			"volleynet_user_id" integer,
			"volleynet_login" text,
			"role" text NOT NULL DEFAULT 'user',
			"created_at" datetime NOT NULL,
			"updated_at" datetime NOT NULL,
			"deleted_at" datetime
		);
		CREATE UNIQUE INDEX "idx_users_email" ON "users" ("email")
	"#,
        r#"
		CREATE TABLE "volleynet_players" (
			"id" integer PRIMARY KEY NOT NULL,
			"first_name" text NOT NULL,
			"last_name" text NOT NULL,
			"birthday" date,
			"gender" text NOT NULL,
			"total_points" integer NOT NULL DEFAULT 0,
			"ladder_rank" integer NOT NULL DEFAULT 0,
			"club" text,
			"country_union" text,
			"license" text,
			"created_at" datetime NOT NULL,
			"updated_at" datetime
		)
	"#,
        r#"
		CREATE TABLE "volleynet_tournaments" (
			"id" integer PRIMARY KEY NOT NULL,
			"name" text NOT NULL,
			"start_date" datetime,
			"end_date" datetime,
			"season" integer NOT NULL,
			"gender" text NOT NULL,
			"league" text NOT NULL,
			"phase" text NOT NULL,
			"status" text NOT NULL,
			"registration_open" integer NOT NULL DEFAULT 0,
			"link" text NOT NULL,
			"entry_link" text,
			"location" text,
			"mode" text,
			"max_teams" integer,
			"signedup_teams" integer NOT NULL DEFAULT 0,
			"organiser" text,
			"phone" text,
			"email" text,
			"website" text,
			"entry_fee" real NOT NULL DEFAULT 0,
			"current_points" text,
			"end_registration" date,
			"html_notes" text,
			"created_at" datetime NOT NULL,
			"updated_at" datetime
		)
	"#,
        r#"
		CREATE TABLE "volleynet_tournament_teams" (
			"tournament_id" integer NOT NULL REFERENCES "volleynet_tournaments" ("id"),
			"player_1_id" integer NOT NULL REFERENCES "volleynet_players" ("id"),
			"player_2_id" integer NOT NULL REFERENCES "volleynet_players" ("id"),
			"seed" integer NOT NULL DEFAULT 0,
			"result" integer NOT NULL DEFAULT 0,
			"total_points" integer NOT NULL DEFAULT 0,
			"won_points" integer NOT NULL DEFAULT 0,
			"prize_money" real NOT NULL DEFAULT 0,
			"deregistered" integer NOT NULL DEFAULT 0,
			"created_at" datetime NOT NULL,
			"updated_at" datetime,
			PRIMARY KEY ("tournament_id", "player_1_id", "player_2_id")
		)
	"#,
    ],
    // v2
    &[r#"
		CREATE TABLE "settings" (
			"s_key" text NOT NULL,
			"s_value" text NOT NULL,
			"s_type" text NOT NULL,
			"user_id" integer REFERENCES "users" ("id"),
			"created_at" datetime NOT NULL,
			"updated_at" datetime,
			PRIMARY KEY ("s_key", "user_id")
		)
	"#],
    // v3
    &[r#"
		ALTER TABLE "volleynet_tournaments" ADD COLUMN "league_slug" text NOT NULL DEFAULT '';
		ALTER TABLE "volleynet_tournaments" ADD COLUMN "sub_league" text NOT NULL DEFAULT '';
		ALTER TABLE "volleynet_tournaments" ADD COLUMN "sub_league_slug" text NOT NULL DEFAULT '';
		CREATE INDEX "idx_tournaments_season_league" ON "volleynet_tournaments" ("season", "league_slug");
		CREATE INDEX "idx_players_gender_rank" ON "volleynet_players" ("gender", "ladder_rank")
	"#],
];

const V1_TABLES: TableNames<'static> = &[
    "volleynet_tournament_teams",
    "volleynet_tournaments",
    "volleynet_players",
    "users",
];

const V2_TABLES: TableNames<'static> = &[
    "settings",
    "volleynet_tournament_teams",
    "volleynet_tournaments",
    "volleynet_players",
    "users",
];

/// Tables emptied by [`super::reset`], indexed by version - 1
pub const RESETS: &[TableNames<'static>] = &[V1_TABLES, V2_TABLES, V2_TABLES];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_version_has_a_reset_set() {
        assert_eq!(MIGRATIONS.len(), RESETS.len());
    }
}
