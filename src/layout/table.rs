//! Table assembly: grid-width resolution, horizontal merge, per-cell margins
//! and decorations, vertical alignment, and handing finished rows to the
//! pagination loop.

use crate::content::{self, BlankRow, Column, Row};
use crate::error::Error;
use crate::model::{Table, TableRow as TableRowNode, Twips};
use crate::style::VAlignment;

use super::Engine;

impl<'a> Engine<'a> {
    pub(super) fn process_table(
        &mut self,
        table: &'a Table,
        column: &mut Column,
    ) -> Result<(), Error> {
        for row in &table.rows {
            let table_row = self.build_table_row(table, row, column.x_offset)?;
            column.add_table_row(table_row);
            let height = column.content_height();
            self.render_column(column, false, false, height)?;
        }
        Ok(())
    }

    /// Lay out one row's cells into sibling columns sharing an x baseline.
    ///
    /// Each cell gets an inner column narrowed by its left/right margins
    /// (buffered during the content pre-pass) wrapped in an outer column
    /// that carries fill, borders and vertical alignment, with the top and
    /// bottom margins as blank rows around the nested content.
    fn build_table_row(
        &mut self,
        table: &'a Table,
        row: &'a TableRowNode,
        origin: Twips,
    ) -> Result<content::TableRow, Error> {
        let mut cells = Vec::with_capacity(row.cells.len());
        let mut x = origin;
        let mut grid_index = 0usize;

        for cell in &row.cells {
            let span = cell.props.grid_span.max(1) as usize;
            if grid_index + span > table.grid.len() {
                return Err(Error::Contract(format!(
                    "cell span {span} at grid column {grid_index} exceeds the {}-column grid",
                    table.grid.len()
                )));
            }
            // Horizontal merge: the cell takes the summed width of the grid
            // columns it spans.
            let width: Twips = table.grid[grid_index..grid_index + span].iter().sum();
            grid_index += span;

            let margins = cell.props.margins.unwrap_or(table.cell_margins);

            let mut inner = Column::new(
                x + margins.left,
                (width - margins.left - margins.right).max(0),
            );
            inner.buffered = true;
            self.walk_blocks(&cell.blocks, &mut inner)?;
            inner.buffered = false;

            let mut outer = Column::new(x, width);
            outer.fill = cell.props.fill;
            outer.borders = cell.props.borders;
            outer.v_align = cell.props.v_align;
            outer.add_vertical_space(margins.top);
            outer.add_table_row(content::TableRow {
                columns: vec![inner],
                min_height: 0,
            });
            outer.add_vertical_space(margins.bottom);

            x += width;
            cells.push(outer);
        }

        let mut table_row = content::TableRow {
            columns: cells,
            min_height: row.min_height.unwrap_or(0),
        };

        // Vertical alignment becomes lead blank space now that the row
        // height is known; a later page split then keeps continuation cells
        // anchored at the same y without re-deriving offsets.
        let row_height = table_row.content_height();
        for cell in &mut table_row.columns {
            let lead = match cell.v_align {
                Some(VAlignment::Center) => (row_height - cell.content_height()) / 2,
                Some(VAlignment::Bottom) => row_height - cell.content_height(),
                _ => 0,
            };
            if lead > 0 {
                cell.rows.push_front(Row::Blank(BlankRow { height: lead }));
            }
        }

        Ok(table_row)
    }
}
