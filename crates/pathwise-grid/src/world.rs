//! Grid worlds and their search vertices.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use log::debug;
use pathwise_core::{Point, Range};
use pathwise_search::{Path, Pathfinder, Scoring, Vertex};

use crate::error::GridError;
use crate::map::GridMap;
use crate::rules::GridRules;

#[derive(Debug)]
struct Shared {
    map: GridMap,
    rules: GridRules,
    /// Scales the heuristic so it stays admissible when tiles cost less
    /// than one.
    heuristic_scale: f32,
}

/// An immutable map plus movement rules, shared by all of its vertices.
///
/// Cloning a `GridWorld` is cheap. Positions are validated by
/// [`vertex`](Self::vertex) before they reach the search.
#[derive(Debug, Clone)]
pub struct GridWorld {
    shared: Arc<Shared>,
}

impl GridWorld {
    /// Fails if the rules' diagonal factor is outside
    /// [`DIAGONAL_FACTOR_RANGE`](crate::DIAGONAL_FACTOR_RANGE).
    pub fn new(map: GridMap, rules: GridRules) -> Result<Self, GridError> {
        rules.validate()?;
        let heuristic_scale = map.min_cost().map_or(1.0, |c| c.min(1.0));
        Ok(Self {
            shared: Arc::new(Shared {
                map,
                rules,
                heuristic_scale,
            }),
        })
    }

    #[inline]
    pub fn map(&self) -> &GridMap {
        &self.shared.map
    }

    #[inline]
    pub fn rules(&self) -> &GridRules {
        &self.shared.rules
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.shared.map.range()
    }

    /// The search vertex for `p`.
    pub fn vertex(&self, p: Point) -> Result<GridVertex, GridError> {
        let index = self.range().index_of(p).ok_or(GridError::OutOfBounds(p))?;
        Ok(GridVertex {
            pos: p,
            index,
            world: Arc::clone(&self.shared),
        })
    }

    /// Whether a walker standing on `from` may step onto the adjacent `to`.
    ///
    /// Only the destination has to be walkable, so a walker standing on a
    /// blocked tile can still step off it.
    pub fn can_move(&self, from: Point, to: Point) -> bool {
        self.shared.can_move(from, to)
    }

    /// Route from `from` to the nearest of `goals`.
    ///
    /// Fails only if a position is outside the map; an unreachable goal set
    /// yields `Ok(None)`.
    pub fn find_path(
        &self,
        pathfinder: &mut Pathfinder<GridVertex>,
        from: Point,
        goals: &[Point],
        scoring: Scoring,
    ) -> Result<Option<Path<GridVertex>>, GridError> {
        let origin = self.vertex(from)?;
        let goals = goals
            .iter()
            .map(|&g| self.vertex(g))
            .collect::<Result<Vec<_>, _>>()?;
        let path = pathfinder.find_path(&origin, &goals, scoring);
        if path.is_none() {
            debug!("no route from {from} to any of {} goals", goals.len());
        }
        Ok(path)
    }

    /// Like [`find_path`](Self::find_path) with a single goal, returning
    /// the positions to walk through.
    pub fn route(
        &self,
        pathfinder: &mut Pathfinder<GridVertex>,
        from: Point,
        to: Point,
        scoring: Scoring,
    ) -> Result<Option<Vec<Point>>, GridError> {
        let path = self.find_path(pathfinder, from, &[to], scoring)?;
        Ok(path.map(|p| p.iter().map(GridVertex::pos).collect()))
    }
}

impl Shared {
    fn can_move(&self, from: Point, to: Point) -> bool {
        if !self.map.contains(from) || !self.map.is_walkable(to) {
            return false;
        }
        if from.is_diagonal_to(to) {
            if !self.rules.diagonal {
                return false;
            }
            if !self.rules.corner_cutting
                && !(self.map.is_walkable(Point::new(from.x, to.y))
                    && self.map.is_walkable(Point::new(to.x, from.y)))
            {
                return false;
            }
        }
        true
    }
}

/// A grid position taking part in a search.
///
/// Equality and hashing go by index, which is the row-major position of the
/// tile within its world.
#[derive(Clone)]
pub struct GridVertex {
    pos: Point,
    index: usize,
    world: Arc<Shared>,
}

impl GridVertex {
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }
}

impl Vertex for GridVertex {
    #[inline]
    fn index(&self) -> usize {
        self.index
    }

    /// Tiles from which this tile can be entered in one step.
    fn neighbors(&self, buf: &mut Vec<Self>) {
        let world = &self.world;
        let mut push = |p: Point| {
            if !world.can_move(p, self.pos) {
                return;
            }
            if let Some(index) = world.map.range().index_of(p) {
                buf.push(GridVertex {
                    pos: p,
                    index,
                    world: Arc::clone(world),
                });
            }
        };
        if world.rules.diagonal {
            self.pos.neighbors_8().into_iter().for_each(&mut push);
        } else {
            self.pos.neighbors_4().into_iter().for_each(&mut push);
        }
    }

    fn travel_cost(&self, to: &Self) -> f32 {
        let base = self.world.map.cost(to.pos).unwrap_or(f32::INFINITY);
        if self.pos.is_diagonal_to(to.pos) {
            base * self.world.rules.diagonal_factor
        } else {
            base
        }
    }

    fn distance(&self, to: &Self) -> f32 {
        self.world.rules.estimate(self.pos, to.pos) * self.world.heuristic_scale
    }
}

impl PartialEq for GridVertex {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for GridVertex {}

impl Hash for GridVertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl fmt::Debug for GridVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridVertex")
            .field("pos", &self.pos)
            .field("index", &self.index)
            .finish()
    }
}

impl fmt::Display for GridVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pos.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;
    use proptest::prelude::*;
    use std::collections::{HashSet, VecDeque};

    fn world(picture: &str, rules: GridRules) -> GridWorld {
        GridWorld::new(GridMap::parse(picture).unwrap(), rules).unwrap()
    }

    fn open(w: i32, h: i32, rules: GridRules) -> GridWorld {
        GridWorld::new(GridMap::new(w, h).unwrap(), rules).unwrap()
    }

    fn neighbor_positions(world: &GridWorld, p: Point) -> HashSet<Point> {
        let mut buf = Vec::new();
        world.vertex(p).unwrap().neighbors(&mut buf);
        buf.iter().map(GridVertex::pos).collect()
    }

    /// Every step is a legal move and costs add up.
    fn check_route(world: &GridWorld, from: Point, path: &Path<GridVertex>) {
        let mut prev = world.vertex(from).unwrap();
        let mut total = 0.0;
        for step in path {
            assert!(world.can_move(prev.pos(), step.pos()), "{prev} -> {step}");
            total += prev.travel_cost(step);
            prev = step.clone();
        }
        assert!((total - path.cost()).abs() < 1e-4);
    }

    #[test]
    fn open_grid_5x5_four_way() {
        let w = open(5, 5, GridRules::cardinal());
        let mut pf = Pathfinder::new();
        let path = w
            .find_path(&mut pf, Point::new(0, 0), &[Point::new(4, 4)], Scoring::CostPlusHeuristic)
            .unwrap()
            .unwrap();
        assert_eq!(path.cost(), 8.0);
        assert_eq!(path.len(), 8);
        assert_eq!(path.goal().map(GridVertex::pos), Some(Point::new(4, 4)));
        check_route(&w, Point::new(0, 0), &path);
    }

    #[test]
    fn open_grid_diagonal_uses_octile_cost() {
        let w = open(5, 5, GridRules::diagonal());
        let mut pf = Pathfinder::new();
        let path = w
            .find_path(&mut pf, Point::new(0, 0), &[Point::new(4, 2)], Scoring::default())
            .unwrap()
            .unwrap();
        // two diagonal steps, two straight
        assert_eq!(path.len(), 4);
        assert!((path.cost() - (2.0 * 1.4 + 2.0)).abs() < 1e-5);
        check_route(&w, Point::new(0, 0), &path);
    }

    #[test]
    fn index_is_row_major() {
        let w = open(5, 4, GridRules::cardinal());
        assert_eq!(w.vertex(Point::new(3, 2)).unwrap().index(), 13);
        assert_eq!(
            w.vertex(Point::new(5, 0)).unwrap_err(),
            GridError::OutOfBounds(Point::new(5, 0))
        );
    }

    #[test]
    fn vertex_equality_by_index() {
        let w = open(3, 3, GridRules::cardinal());
        let a = w.vertex(Point::new(1, 2)).unwrap();
        let b = w.vertex(Point::new(1, 2)).unwrap();
        let c = w.vertex(Point::new(2, 1)).unwrap();
        assert_eq!(a, b);
        assert!(a.same_vertex(&b));
        assert_ne!(a, c);
        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn neighbors_respect_walls_and_bounds() {
        let w = world(
            "
            .#.
            ...
            ",
            GridRules::cardinal(),
        );
        // The wall at (1, 0) is listed: a walker standing on it may step off.
        let ns = neighbor_positions(&w, Point::new(0, 0));
        assert_eq!(ns, HashSet::from([Point::new(1, 0), Point::new(0, 1)]));
        // A blocked tile has no way in.
        assert!(neighbor_positions(&w, Point::new(1, 0)).is_empty());
        let ns = neighbor_positions(&w, Point::new(2, 1));
        assert_eq!(
            ns,
            HashSet::from([Point::new(2, 0), Point::new(1, 1)])
        );
    }

    #[test]
    fn corner_cutting_rule() {
        let picture = "
            .#
            ..
        ";
        let strict = world(picture, GridRules::diagonal());
        assert!(!strict.can_move(Point::new(0, 0), Point::new(1, 1)));
        assert!(!neighbor_positions(&strict, Point::new(1, 1)).contains(&Point::new(0, 0)));

        let loose = world(picture, GridRules::diagonal().with_corner_cutting(true));
        assert!(loose.can_move(Point::new(0, 0), Point::new(1, 1)));
        assert!(neighbor_positions(&loose, Point::new(1, 1)).contains(&Point::new(0, 0)));

        let cardinal = world(picture, GridRules::cardinal().with_corner_cutting(true));
        assert!(!cardinal.can_move(Point::new(0, 0), Point::new(1, 1)));
    }

    #[test]
    fn walks_around_wall() {
        let w = world(
            "
            .....
            .###.
            .#...
            .#.#.
            .#.#.
            ",
            GridRules::cardinal(),
        );
        let mut pf = Pathfinder::new();
        let route = w
            .route(&mut pf, Point::new(2, 2), Point::new(0, 4), Scoring::CostOnly)
            .unwrap()
            .unwrap();
        // Out through the east side, over the top and down the west column.
        assert_eq!(route.len(), 12);
        assert_eq!(route.last(), Some(&Point::new(0, 4)));
        assert!(route.iter().all(|&p| w.map().is_walkable(p)));
    }

    #[test]
    fn walled_in_goal_is_unreachable() {
        let w = world(
            "
            ..#..
            ..#..
            ..#..
            ",
            GridRules::diagonal().with_corner_cutting(true),
        );
        let mut pf = Pathfinder::new();
        let result = w
            .find_path(&mut pf, Point::new(0, 1), &[Point::new(4, 1)], Scoring::default())
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn origin_on_goal_is_empty_route() {
        let w = open(3, 3, GridRules::cardinal());
        let mut pf = Pathfinder::new();
        let route = w
            .route(&mut pf, Point::new(1, 1), Point::new(1, 1), Scoring::default())
            .unwrap();
        assert_eq!(route, Some(Vec::new()));
    }

    #[test]
    fn out_of_bounds_goal_is_an_error() {
        let w = open(3, 3, GridRules::cardinal());
        let mut pf = Pathfinder::new();
        let err = w
            .find_path(&mut pf, Point::new(0, 0), &[Point::new(1, 1), Point::new(-1, 0)], Scoring::default())
            .unwrap_err();
        assert_eq!(err, GridError::OutOfBounds(Point::new(-1, 0)));
    }

    #[test]
    fn multi_goal_returns_nearest_exit() {
        let w = open(10, 1, GridRules::cardinal());
        let mut pf = Pathfinder::new();
        let exits = [Point::new(0, 0), Point::new(9, 0)];
        let path = w
            .find_path(&mut pf, Point::new(6, 0), &exits, Scoring::default())
            .unwrap()
            .unwrap();
        assert_eq!(path.goal().map(GridVertex::pos), Some(Point::new(9, 0)));
        assert_eq!(path.cost(), 3.0);
    }

    #[test]
    fn expensive_tiles_are_avoided() {
        let mut map = GridMap::new(3, 3).unwrap();
        map.set_cost(Point::new(1, 1), 10.0).unwrap();
        let w = GridWorld::new(map, GridRules::cardinal()).unwrap();
        let mut pf = Pathfinder::new();
        let route = w
            .route(&mut pf, Point::new(1, 0), Point::new(1, 2), Scoring::CostOnly)
            .unwrap()
            .unwrap();
        assert!(!route.contains(&Point::new(1, 1)));
        assert_eq!(route.len(), 4);
    }

    #[test]
    fn cheap_tiles_keep_heuristic_admissible() {
        let mut map = GridMap::new(6, 1).unwrap();
        for x in 0..6 {
            map.set_cost(Point::new(x, 0), 0.25).unwrap();
        }
        let w = GridWorld::new(map, GridRules::cardinal()).unwrap();
        let a = w.vertex(Point::new(0, 0)).unwrap();
        let b = w.vertex(Point::new(5, 0)).unwrap();
        assert!(a.distance(&b) <= 5.0 * 0.25);
    }

    #[test]
    fn blocked_origin_can_step_off() {
        let w = world("#..", GridRules::cardinal());
        let mut pf = Pathfinder::new();
        let route = w
            .route(&mut pf, Point::new(0, 0), Point::new(2, 0), Scoring::default())
            .unwrap();
        assert_eq!(route, Some(vec![Point::new(1, 0), Point::new(2, 0)]));
    }

    #[test]
    fn out_of_range_diagonal_factor_is_rejected() {
        for factor in [-1.0, 0.9, 2.1, f32::NAN] {
            let rules = GridRules::diagonal().with_diagonal_factor(factor);
            let err = GridWorld::new(GridMap::new(3, 3).unwrap(), rules).unwrap_err();
            assert!(matches!(err, GridError::InvalidDiagonalFactor(_)));
        }
        let w = open(3, 3, GridRules::diagonal().with_diagonal_factor(2.0));
        let a = w.vertex(Point::new(0, 0)).unwrap();
        let b = w.vertex(Point::new(1, 1)).unwrap();
        assert_eq!(a.travel_cost(&b), 2.0);
    }

    /// Unit-cost BFS distance over the same legality rules.
    fn bfs(world: &GridWorld, from: Point, to: Point) -> Option<usize> {
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([(from, 0)]);
        while let Some((p, d)) = queue.pop_front() {
            if p == to {
                return Some(d);
            }
            for n in p.neighbors_4() {
                if world.can_move(p, n) && seen.insert(n) {
                    queue.push_back((n, d + 1));
                }
            }
        }
        None
    }

    /// Dijkstra cost over the same legality rules and step costs.
    fn dijkstra(world: &GridWorld, from: Point, to: Point) -> Option<f32> {
        let range = world.range();
        let width = range.width() as usize;
        let mut dist = vec![f32::INFINITY; range.len()];
        let mut done = vec![false; range.len()];
        dist[range.index_of(from)?] = 0.0;
        loop {
            let (i, d) = dist
                .iter()
                .copied()
                .enumerate()
                .filter(|&(i, d)| !done[i] && d.is_finite())
                .min_by(|a, b| a.1.total_cmp(&b.1))?;
            done[i] = true;
            let p = Point::new((i % width) as i32, (i / width) as i32);
            if p == to {
                return Some(d);
            }
            let here = world.vertex(p).unwrap();
            for n in p.neighbors_8() {
                if world.can_move(p, n) {
                    let j = range.index_of(n).unwrap();
                    let step = here.travel_cost(&world.vertex(n).unwrap());
                    dist[j] = dist[j].min(d + step);
                }
            }
        }
    }

    proptest! {
        #[test]
        fn eight_way_routes_are_cheapest(
            tiles in prop::collection::vec(0u8..6, 36),
            cut in any::<bool>(),
            factor in prop::sample::select(vec![1.0f32, 1.4, 1.5, 2.0]),
            from in (0..6i32, 0..6i32),
            to in (0..6i32, 0..6i32),
        ) {
            // 0 is a wall; the rest are entry costs, some below one.
            const COSTS: [f32; 6] = [0.0, 0.5, 1.0, 1.0, 2.0, 3.0];
            let mut map = GridMap::new(6, 6).unwrap();
            for (i, &t) in tiles.iter().enumerate() {
                let p = Point::new(i as i32 % 6, i as i32 / 6);
                if t == 0 {
                    map.set_blocked(p).unwrap();
                } else {
                    map.set_cost(p, COSTS[t as usize]).unwrap();
                }
            }
            let from = Point::from(from);
            let to = Point::from(to);
            let rules = GridRules::diagonal()
                .with_corner_cutting(cut)
                .with_diagonal_factor(factor);
            prop_assert_eq!(rules.metric(), crate::Metric::Octile);
            let w = GridWorld::new(map, rules).unwrap();
            let mut pf = Pathfinder::new();

            let expected = dijkstra(&w, from, to);
            let path = w.find_path(&mut pf, from, &[to], Scoring::CostPlusHeuristic).unwrap();
            match (path, expected) {
                (Some(path), Some(cost)) => {
                    prop_assert!(
                        (path.cost() - cost).abs() < 1e-3,
                        "got {}, want {}", path.cost(), cost
                    );
                    check_route(&w, from, &path);
                }
                (None, None) => {}
                (got, want) => prop_assert!(false, "got {:?}, want {:?}", got.map(|p| p.cost()), want),
            }
        }

        #[test]
        fn four_way_routes_are_shortest(
            walls in prop::collection::vec(any::<bool>(), 36),
            from in (0..6i32, 0..6i32),
            to in (0..6i32, 0..6i32),
        ) {
            let mut map = GridMap::new(6, 6).unwrap();
            for (i, &wall) in walls.iter().enumerate() {
                if wall && i % 3 == 0 {
                    map.set_blocked(Point::new(i as i32 % 6, i as i32 / 6)).unwrap();
                }
            }
            let from = Point::from(from);
            let to = Point::from(to);
            let w = GridWorld::new(map, GridRules::cardinal()).unwrap();
            let mut pf = Pathfinder::new();

            let expected = bfs(&w, from, to);
            let path = w.find_path(&mut pf, from, &[to], Scoring::CostPlusHeuristic).unwrap();
            match (path, expected) {
                (Some(path), Some(d)) => {
                    prop_assert_eq!(path.len(), d);
                    prop_assert_eq!(path.cost(), d as f32);
                    prop_assert!(path.len() as i32 >= manhattan(from, to));
                    check_route(&w, from, &path);
                }
                (None, None) => {}
                (got, want) => prop_assert!(false, "got {:?}, want {:?}", got.map(|p| p.len()), want),
            }
        }
    }
}
