//! REPL commands
//!
//! The command table and all mutable session state live in [`Session`],
//! which is built once in `main` and handed to every command.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::api::PokeApiClient;
use crate::models::Pokemon;

/// A roll below this value catches the Pokemon.
pub const CATCH_THRESHOLD: u32 = 50;

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

/// One entry of the command table.
#[derive(Debug, Clone)]
pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: CommandKind,
}

/// Commands in the order `help` lists them.
pub fn default_commands() -> Vec<Command> {
    vec![
        Command {
            name: "help",
            description: "Displays a help message",
            kind: CommandKind::Help,
        },
        Command {
            name: "exit",
            description: "Exit the Pokedex",
            kind: CommandKind::Exit,
        },
        Command {
            name: "map",
            description: "Shows the next 20 location areas",
            kind: CommandKind::Map,
        },
        Command {
            name: "mapb",
            description: "Shows the previous 20 location areas",
            kind: CommandKind::MapBack,
        },
        Command {
            name: "explore",
            description: "Displays a location's pokemon: explore <area>",
            kind: CommandKind::Explore,
        },
        Command {
            name: "catch",
            description: "Throws a Pokeball at a pokemon: catch <pokemon>",
            kind: CommandKind::Catch,
        },
        Command {
            name: "inspect",
            description: "Shows details of a caught pokemon: inspect <pokemon>",
            kind: CommandKind::Inspect,
        },
        Command {
            name: "pokedex",
            description: "Lists every pokemon you have caught",
            kind: CommandKind::Pokedex,
        },
    ]
}

/// Returns whether a throw at a Pokemon with `base_experience` succeeds.
///
/// The roll is uniform in `0..base_experience`, so anything at or below the
/// threshold is always caught.
pub fn catch_succeeds<R: Rng>(rng: &mut R, base_experience: Option<u32>) -> bool {
    let difficulty = base_experience.unwrap_or(0).max(1);
    rng.gen_range(0..difficulty) < CATCH_THRESHOLD
}

// == Session ==
/// State shared by all commands for one REPL run.
#[derive(Debug)]
pub struct Session {
    client: PokeApiClient,
    commands: Vec<Command>,
    next: Option<String>,
    previous: Option<String>,
    at_last_page: bool,
    pokedex: BTreeMap<String, Pokemon>,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Session with a caller-provided RNG, for reproducible catch rolls.
    pub fn with_rng(client: PokeApiClient, rng: StdRng) -> Self {
        Self {
            client,
            commands: default_commands(),
            next: None,
            previous: None,
            at_last_page: false,
            pokedex: BTreeMap::new(),
            rng,
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn pokedex(&self) -> &BTreeMap<String, Pokemon> {
        &self.pokedex
    }

    // == Execute ==
    /// Runs the command called `name`; unknown names are reported to `out`.
    pub async fn execute(
        &mut self,
        name: &str,
        args: &[String],
        out: &mut impl Write,
    ) -> Result<Flow> {
        let Some(kind) = self.commands.iter().find(|c| c.name == name).map(|c| c.kind) else {
            writeln!(out, "Unknown command")?;
            return Ok(Flow::Continue);
        };
        let arg = args.first().map(String::as_str);

        match kind {
            CommandKind::Help => self.help(out)?,
            CommandKind::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            CommandKind::Map => self.map_forward(out).await?,
            CommandKind::MapBack => self.map_back(out).await?,
            CommandKind::Explore => self.explore(arg, out).await?,
            CommandKind::Catch => self.catch(arg, out).await?,
            CommandKind::Inspect => self.inspect(arg, out)?,
            CommandKind::Pokedex => self.list_pokedex(out)?,
        }
        Ok(Flow::Continue)
    }

    fn help(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for command in &self.commands {
            writeln!(out, "{}: {}", command.name, command.description)?;
        }
        Ok(())
    }

    async fn map_forward(&mut self, out: &mut impl Write) -> Result<()> {
        if self.at_last_page {
            writeln!(out, "you're on the last page")?;
            return Ok(());
        }
        let url = self.next.clone();
        self.show_page(url.as_deref(), out).await
    }

    async fn map_back(&mut self, out: &mut impl Write) -> Result<()> {
        let Some(url) = self.previous.clone() else {
            writeln!(out, "you're on the first page")?;
            return Ok(());
        };
        self.show_page(Some(&url), out).await
    }

    async fn show_page(&mut self, url: Option<&str>, out: &mut impl Write) -> Result<()> {
        let page = self.client.location_areas(url).await?;
        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }

        self.at_last_page = page.next.is_none();
        self.next = page.next;
        self.previous = page.previous;
        Ok(())
    }

    async fn explore(&mut self, area: Option<&str>, out: &mut impl Write) -> Result<()> {
        let Some(area) = area else {
            writeln!(out, "No location given.")?;
            return Ok(());
        };

        let location = self.client.location_area(area).await?;
        writeln!(out, "Exploring {}...", area)?;
        writeln!(out, "Found Pokemon:")?;
        for encounter in &location.pokemon_encounters {
            writeln!(out, " - {}", encounter.pokemon.name)?;
        }
        Ok(())
    }

    async fn catch(&mut self, name: Option<&str>, out: &mut impl Write) -> Result<()> {
        let Some(name) = name else {
            writeln!(out, "No pokemon given.")?;
            return Ok(());
        };

        let pokemon = self.client.pokemon(name).await?;
        writeln!(out, "Throwing a Pokeball at {}...", pokemon.name)?;

        if catch_succeeds(&mut self.rng, pokemon.base_experience) {
            writeln!(out, "{} was caught!", pokemon.name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.insert(pokemon.name.clone(), pokemon);
        } else {
            writeln!(out, "{} escaped!", pokemon.name)?;
        }
        Ok(())
    }

    fn inspect(&self, name: Option<&str>, out: &mut impl Write) -> Result<()> {
        let Some(pokemon) = name.and_then(|name| self.pokedex.get(name)) else {
            writeln!(out, "you have not caught that pokemon")?;
            return Ok(());
        };

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.kind.name)?;
        }
        Ok(())
    }

    fn list_pokedex(&self, out: &mut impl Write) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty.")?;
            return Ok(());
        }
        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.keys() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }
}
