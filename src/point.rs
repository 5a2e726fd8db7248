use std::ops::{Add, AddAssign, Sub};

/// Board coordinate: `Point(column, row)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point<T>(pub T, pub T);

impl<T: Copy> Point<T> {
    pub fn x(&self) -> T {
        self.0
    }
    pub fn y(&self) -> T {
        self.1
    }
}

impl<T: Copy + Ord> Point<T> {
    /// Half-open containment: `min <= p < max` on both axes.
    pub fn is_inside(&self, min: Self, max: Self) -> bool {
        (min.0..max.0).contains(&self.0) && (min.1..max.1).contains(&self.1)
    }
}

macro_rules! impl_point_ops {
    ($trait:ident, $method:ident) => {
        impl<T: $trait<Output = T>> $trait for Point<T> {
            type Output = Point<T>;

            fn $method(self, rhs: Self) -> Self::Output {
                let Point(x1, y1) = self;
                let Point(x2, y2) = rhs;
                Point(x1.$method(x2), y1.$method(y2))
            }
        }
    };
}
macro_rules! impl_point_assign_ops {
    ($trait:ident, $method:ident) => {
        impl<T: $trait> $trait for Point<T> {
            fn $method(&mut self, rhs: Self) {
                self.0.$method(rhs.0);
                self.1.$method(rhs.1);
            }
        }
    };
}

impl_point_ops!(Add, add);
impl_point_ops!(Sub, sub);

impl_point_assign_ops!(AddAssign, add_assign);

#[cfg(test)]
mod tests {
    use crate::point::Point;

    #[test]
    fn test() {
        assert_eq!(Point(2, 1), Point(1, 1) + Point(1, 0));
        assert_eq!(Point(0, 1), Point(1, 1) - Point(1, 0));

        let mut p = Point(4, 0);
        p += Point(-1, 2);
        assert_eq!(Point(3, 2), p);
    }

    #[test]
    fn test_is_inside() {
        let lt = Point(0, 0);
        let rb = Point(10, 20);

        assert!(Point(3, 6).is_inside(lt, rb));
        assert!(Point(9, 19).is_inside(lt, rb));
        assert!(!Point(10, 6).is_inside(lt, rb));
        assert!(!Point(-1, 6).is_inside(lt, rb));
        assert!(!Point(3, 20).is_inside(lt, rb));
        assert!(!Point(3, -2).is_inside(lt, rb));
    }
}
