//! Book catalog operations

use chrono::Utc;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::error::DbError;
use crate::models::{Book, NewBook};
use crate::repository::Database;

/// Optional filters for listing books, composed conjunctively
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    /// Exact author match
    pub author: Option<String>,
    /// Exact category match
    pub category: Option<String>,
    /// Minimum rating (inclusive)
    pub min_rating: Option<f64>,
    /// Case-insensitive title substring match
    pub title: Option<String>,
}

impl Database {
    /// Insert a new book
    pub async fn insert_book(&self, book: NewBook) -> Result<Book, DbError> {
        let now = Utc::now();

        let row = sqlx::query(
            r#"
            INSERT INTO books (title, author, category, price, rating, published_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.category)
        .bind(book.price)
        .bind(book.rating)
        .bind(book.published_date)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.get("id");

        Ok(Book {
            id,
            title: book.title,
            author: book.author,
            category: book.category,
            price: book.price,
            rating: book.rating,
            published_date: book.published_date,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a book by ID
    pub async fn get_book_by_id(&self, id: i64) -> Result<Option<Book>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, title, author, category, price, rating, published_date, created_at, updated_at
            FROM books
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result
            .map(|row| Book::try_from(&row).map_err(DbError::from))
            .transpose()
    }

    /// List books matching the given filters (all rows when no filter is set)
    pub async fn list_books(&self, filter: &BookFilter) -> Result<Vec<Book>, DbError> {
        let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
            "SELECT id, title, author, category, price, rating, published_date, created_at, updated_at \
             FROM books WHERE 1 = 1",
        );

        if let Some(author) = &filter.author {
            query.push(" AND author = ").push_bind(author.clone());
        }
        if let Some(category) = &filter.category {
            query.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(min_rating) = filter.min_rating {
            query.push(" AND rating >= ").push_bind(min_rating);
        }
        if let Some(title) = &filter.title {
            query
                .push(" AND LOWER(title) LIKE '%' || LOWER(")
                .push_bind(title.clone())
                .push(") || '%'");
        }
        query.push(" ORDER BY id");

        let rows = query.build().fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| Book::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Replace every field of a book (full-replace semantics)
    pub async fn update_book(&self, id: i64, book: NewBook) -> Result<bool, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = ?, author = ?, category = ?, price = ?, rating = ?, published_date = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.category)
        .bind(book.price)
        .bind(book.rating)
        .bind(book.published_date)
        .bind(now.to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a book by ID
    pub async fn delete_book(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_book(title: &str, author: &str, category: &str, rating: f64) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: author.to_string(),
            category: category.to_string(),
            price: 9.99,
            rating,
            published_date: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_book() {
        let db = Database::new_in_memory().await.unwrap();

        let book = db
            .insert_book(sample_book("Dune", "Frank Herbert", "Sci-Fi", 4.5))
            .await
            .unwrap();

        let found = db.get_book_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Dune");
        assert_eq!(found.price, 9.99);
        assert_eq!(
            found.published_date,
            NaiveDate::from_ymd_opt(2020, 6, 1).unwrap()
        );

        assert!(db.get_book_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_books_filters() {
        let db = Database::new_in_memory().await.unwrap();

        db.insert_book(sample_book("Dune", "Frank Herbert", "Sci-Fi", 4.5))
            .await
            .unwrap();
        db.insert_book(sample_book("Dune Messiah", "Frank Herbert", "Sci-Fi", 3.9))
            .await
            .unwrap();
        db.insert_book(sample_book("Emma", "Jane Austen", "Classic", 4.2))
            .await
            .unwrap();

        // No filter returns everything
        let all = db.list_books(&BookFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        // Exact author match
        let by_author = db
            .list_books(&BookFilter {
                author: Some("Frank Herbert".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_author.len(), 2);

        // Minimum rating is inclusive
        let highly_rated = db
            .list_books(&BookFilter {
                min_rating: Some(4.2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(highly_rated.len(), 2);

        // Case-insensitive title substring
        let dune = db
            .list_books(&BookFilter {
                title: Some("dune".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(dune.len(), 2);

        // Filters compose conjunctively
        let combined = db
            .list_books(&BookFilter {
                author: Some("Frank Herbert".to_string()),
                min_rating: Some(4.0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].title, "Dune");
    }

    #[tokio::test]
    async fn test_update_and_delete_book() {
        let db = Database::new_in_memory().await.unwrap();

        let book = db
            .insert_book(sample_book("Dune", "Frank Herbert", "Sci-Fi", 4.5))
            .await
            .unwrap();

        let mut replacement = sample_book("Dune", "Frank Herbert", "Sci-Fi", 4.5);
        replacement.price = 14.99;
        assert!(db.update_book(book.id, replacement).await.unwrap());

        let updated = db.get_book_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(updated.price, 14.99);

        assert!(db.delete_book(book.id).await.unwrap());
        assert!(db.get_book_by_id(book.id).await.unwrap().is_none());

        // Nonexistent rows report no change
        assert!(!db.update_book(9999, sample_book("x", "y", "z", 1.0)).await.unwrap());
        assert!(!db.delete_book(9999).await.unwrap());
    }
}
