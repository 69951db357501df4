//! Built-in movie list served by [`super::StaticCatalog::seeded`].

use crate::movie::{MovieDetail, MovieSummary, Rating};

struct SeedMovie {
    imdb_id: &'static str,
    title: &'static str,
    year: &'static str,
    poster: &'static str,
    rated: &'static str,
    runtime: &'static str,
    genre: &'static str,
    director: &'static str,
    actors: &'static str,
    plot: &'static str,
    imdb_rating: &'static str,
}

const SEED: &[SeedMovie] = &[
    SeedMovie {
        imdb_id: "tt0468569",
        title: "The Dark Knight",
        year: "2008",
        poster: "/dark-knight-poster.png",
        rated: "PG-13",
        runtime: "152 min",
        genre: "Action, Crime, Drama",
        director: "Christopher Nolan",
        actors: "Christian Bale, Heath Ledger, Aaron Eckhart",
        plot: "Batman faces the Joker, a criminal mastermind who plunges Gotham into anarchy.",
        imdb_rating: "9.0",
    },
    SeedMovie {
        imdb_id: "tt0137523",
        title: "Fight Club",
        year: "1999",
        poster: "/fight-club-poster.png",
        rated: "R",
        runtime: "139 min",
        genre: "Drama",
        director: "David Fincher",
        actors: "Brad Pitt, Edward Norton, Meat Loaf",
        plot: "An insomniac office worker and a soap maker form an underground fight club.",
        imdb_rating: "8.8",
    },
    SeedMovie {
        imdb_id: "tt0109830",
        title: "Forrest Gump",
        year: "1994",
        poster: "/forrest-gump-poster.png",
        rated: "PG-13",
        runtime: "142 min",
        genre: "Drama, Romance",
        director: "Robert Zemeckis",
        actors: "Tom Hanks, Robin Wright, Gary Sinise",
        plot: "A kind-hearted man from Alabama witnesses decades of American history.",
        imdb_rating: "8.8",
    },
    SeedMovie {
        imdb_id: "tt0816692",
        title: "Interstellar",
        year: "2014",
        poster: "/interstellar-movie-poster.jpg",
        rated: "PG-13",
        runtime: "169 min",
        genre: "Adventure, Drama, Sci-Fi",
        director: "Christopher Nolan",
        actors: "Matthew McConaughey, Anne Hathaway, Jessica Chastain",
        plot: "Explorers travel through a wormhole in search of a new home for humanity.",
        imdb_rating: "8.7",
    },
    SeedMovie {
        imdb_id: "tt1375666",
        title: "Inception",
        year: "2010",
        poster: "/inception-movie-poster.png",
        rated: "PG-13",
        runtime: "148 min",
        genre: "Action, Adventure, Sci-Fi",
        director: "Christopher Nolan",
        actors: "Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page",
        plot: "A thief who steals secrets through dreams is asked to plant an idea instead.",
        imdb_rating: "8.8",
    },
    SeedMovie {
        imdb_id: "tt0133093",
        title: "The Matrix",
        year: "1999",
        poster: "/matrix-movie-poster.png",
        rated: "R",
        runtime: "136 min",
        genre: "Action, Sci-Fi",
        director: "Lana Wachowski, Lilly Wachowski",
        actors: "Keanu Reeves, Laurence Fishburne, Carrie-Anne Moss",
        plot: "A hacker learns that his reality is a simulation run by machines.",
        imdb_rating: "8.7",
    },
    SeedMovie {
        imdb_id: "tt0110912",
        title: "Pulp Fiction",
        year: "1994",
        poster: "/pulp-fiction-poster.png",
        rated: "R",
        runtime: "154 min",
        genre: "Crime, Drama",
        director: "Quentin Tarantino",
        actors: "John Travolta, Uma Thurman, Samuel L. Jackson",
        plot: "Interlocking stories of Los Angeles criminals, told out of order.",
        imdb_rating: "8.9",
    },
    SeedMovie {
        imdb_id: "tt0167260",
        title: "The Lord of the Rings: The Return of the King",
        year: "2003",
        poster: "/lord-of-the-rings-return-of-the-king-poster.jpg",
        rated: "PG-13",
        runtime: "201 min",
        genre: "Action, Adventure, Drama",
        director: "Peter Jackson",
        actors: "Elijah Wood, Viggo Mortensen, Ian McKellen",
        plot: "The final battle for Middle-earth begins as Frodo nears Mount Doom.",
        imdb_rating: "9.0",
    },
    SeedMovie {
        imdb_id: "tt0120737",
        title: "The Lord of the Rings: The Fellowship of the Ring",
        year: "2001",
        poster: "/lord-of-the-rings-fellowship-poster.jpg",
        rated: "PG-13",
        runtime: "178 min",
        genre: "Action, Adventure, Drama",
        director: "Peter Jackson",
        actors: "Elijah Wood, Ian McKellen, Orlando Bloom",
        plot: "A hobbit sets out with eight companions to destroy a powerful ring.",
        imdb_rating: "8.9",
    },
    SeedMovie {
        imdb_id: "tt0080684",
        title: "Star Wars: Episode V - The Empire Strikes Back",
        year: "1980",
        poster: "/empire-strikes-back-poster.jpg",
        rated: "PG",
        runtime: "124 min",
        genre: "Action, Adventure, Fantasy",
        director: "Irvin Kershner",
        actors: "Mark Hamill, Harrison Ford, Carrie Fisher",
        plot: "The Empire hunts the rebels while Luke trains with Yoda.",
        imdb_rating: "8.7",
    },
    SeedMovie {
        imdb_id: "tt0073486",
        title: "One Flew Over the Cuckoo's Nest",
        year: "1975",
        poster: "/one-flew-over-cuckoos-nest-poster.jpg",
        rated: "R",
        runtime: "133 min",
        genre: "Drama",
        director: "Milos Forman",
        actors: "Jack Nicholson, Louise Fletcher, Danny DeVito",
        plot: "A convict feigns insanity and clashes with the head nurse of a mental ward.",
        imdb_rating: "8.7",
    },
    SeedMovie {
        imdb_id: "tt0099685",
        title: "Goodfellas",
        year: "1990",
        poster: "/goodfellas-poster.png",
        rated: "R",
        runtime: "145 min",
        genre: "Biography, Crime, Drama",
        director: "Martin Scorsese",
        actors: "Robert De Niro, Ray Liotta, Joe Pesci",
        plot: "The rise and fall of mob associate Henry Hill.",
        imdb_rating: "8.7",
    },
    SeedMovie {
        imdb_id: "tt0047478",
        title: "Seven Samurai",
        year: "1954",
        poster: "/seven-samurai-poster.jpg",
        rated: "Not Rated",
        runtime: "207 min",
        genre: "Action, Drama",
        director: "Akira Kurosawa",
        actors: "Toshiro Mifune, Takashi Shimura, Keiko Tsushima",
        plot: "A farming village hires seven masterless samurai to fight off bandits.",
        imdb_rating: "8.6",
    },
    SeedMovie {
        imdb_id: "tt0114369",
        title: "Se7en",
        year: "1995",
        poster: "/se7en-movie-poster.jpg",
        rated: "R",
        runtime: "127 min",
        genre: "Crime, Drama, Mystery",
        director: "David Fincher",
        actors: "Morgan Freeman, Brad Pitt, Kevin Spacey",
        plot: "Two detectives hunt a killer who uses the seven deadly sins as his motive.",
        imdb_rating: "8.6",
    },
    SeedMovie {
        imdb_id: "tt0317248",
        title: "City of God",
        year: "2002",
        poster: "/city-of-god-poster.jpg",
        rated: "R",
        runtime: "130 min",
        genre: "Crime, Drama",
        director: "Fernando Meirelles, Kátia Lund",
        actors: "Alexandre Rodrigues, Leandro Firmino, Matheus Nachtergaele",
        plot: "Two boys grow up on diverging paths in a violent Rio de Janeiro favela.",
        imdb_rating: "8.6",
    },
    SeedMovie {
        imdb_id: "tt0076759",
        title: "Star Wars: Episode IV - A New Hope",
        year: "1977",
        poster: "/star-wars-new-hope-poster.jpg",
        rated: "PG",
        runtime: "121 min",
        genre: "Action, Adventure, Fantasy",
        director: "George Lucas",
        actors: "Mark Hamill, Harrison Ford, Carrie Fisher",
        plot: "A farm boy joins a rebellion to rescue a princess from the Empire.",
        imdb_rating: "8.6",
    },
];

/// Materialize the built-in movie list, in catalog order.
pub(super) fn seed_movies() -> Vec<MovieDetail> {
    SEED.iter()
        .map(|seed| {
            let mut detail = MovieDetail::from_summary(MovieSummary::new(
                seed.imdb_id,
                seed.title,
                seed.year,
                "movie",
                seed.poster,
            ));
            detail.rated = seed.rated.to_string();
            detail.runtime = seed.runtime.to_string();
            detail.genre = seed.genre.to_string();
            detail.director = seed.director.to_string();
            detail.actors = seed.actors.to_string();
            detail.plot = seed.plot.to_string();
            detail.imdb_rating = seed.imdb_rating.to_string();
            detail.ratings = vec![Rating {
                source: "Internet Movie Database".to_string(),
                value: format!("{}/10", seed.imdb_rating),
            }];
            detail
        })
        .collect()
}
